use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;

use crate::cells::Cartesian2DCoordinate;
use crate::grid_traits::MazeShape;
use crate::utils::{self, FnvHashMap};

/// Cells as nodes, open internal passages as edges.
pub type PassageGraph = UnGraph<Cartesian2DCoordinate, ()>;

/// Build the passage graph of a maze. A passage exists where a cell's east or south wall is open
/// and there is a cell on the other side. Node indices are x-major, the same order as
/// `Frame::iter`.
pub fn passage_graph<M: MazeShape + ?Sized>(maze: &M) -> PassageGraph {
    let (width, height) = (maze.width(), maze.height());
    let walls = maze.wall_columns();
    let internal_edges = width.saturating_sub(1) * height + width * height.saturating_sub(1);

    let mut graph = PassageGraph::with_capacity(width * height, internal_edges);
    let mut nodes: FnvHashMap<Cartesian2DCoordinate, NodeIndex> = utils::fnv_hashmap(width *
                                                                                     height);
    for x in 0..width {
        for y in 0..height {
            let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
            nodes.insert(coord, graph.add_node(coord));
        }
    }

    for (x, column) in walls.iter().enumerate().take(width) {
        for (y, cell_walls) in column.iter().enumerate().take(height) {
            let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
            if !cell_walls.east && x + 1 < width {
                add_passage(&mut graph, &nodes, coord, Cartesian2DCoordinate::new(x as u32 + 1, y as u32));
            }
            if !cell_walls.south && y + 1 < height {
                add_passage(&mut graph, &nodes, coord, Cartesian2DCoordinate::new(x as u32, y as u32 + 1));
            }
        }
    }
    graph
}

fn add_passage(graph: &mut PassageGraph,
               nodes: &FnvHashMap<Cartesian2DCoordinate, NodeIndex>,
               a: Cartesian2DCoordinate,
               b: Cartesian2DCoordinate) {
    if let (Some(&a_index), Some(&b_index)) = (nodes.get(&a), nodes.get(&b)) {
        graph.add_edge(a_index, b_index, ());
    }
}

/// A perfect maze has exactly one route between any two cells: connected and acyclic.
pub fn is_perfect<M: MazeShape + ?Sized>(maze: &M) -> bool {
    let graph = passage_graph(maze);
    graph.node_count() > 0 && graph.edge_count() == graph.node_count() - 1 &&
    connected_components(&graph) == 1
}

/// How many cells can be walked to from the top left cell, the origin included.
pub fn reachable_from_origin<M: MazeShape + ?Sized>(maze: &M) -> usize {
    let graph = passage_graph(maze);
    if graph.node_count() == 0 {
        return 0;
    }

    let mut bfs = Bfs::new(&graph, NodeIndex::new(0));
    let mut reached = 0;
    while bfs.next(&graph).is_some() {
        reached += 1;
    }
    reached
}

/// Text edge list of the maze's passages.
///
/// Line 1 is the vertex count and the edge count, each following line is one passage between two
/// vertices. Vertices are numbered from 1 in row-major order.
pub fn edge_list<M: MazeShape + ?Sized>(maze: &M) -> String {
    let graph = passage_graph(maze);
    let width = maze.width() as u32;
    let vertex_number = |coord: Cartesian2DCoordinate| coord.y * width + coord.x + 1;

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", graph.node_count(), graph.edge_count()));
    for edge in graph.raw_edges() {
        let src = graph[edge.source()];
        let dst = graph[edge.target()];
        graph_data.push_str(&format!("{} {}\n", vertex_number(src), vertex_number(dst)));
    }
    graph_data
}
