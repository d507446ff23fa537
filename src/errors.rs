// Create the Error, ErrorKind, ResultExt, and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`.
// Not finding a path is never one of these: it is a `SearchResult` without a path.
use crate::cells::NodeId;

error_chain! {

    foreign_links {
        DocOptFailure(::docopt::Error);
    }

    errors {
        OutOfRange(what: String) {
            description("coordinate or node outside of the grid")
            display("outside of the grid: {}", what)
        }
        InvalidGridLength(length: usize) {
            description("invalid grid length")
            display("invalid grid length {}, a maze needs at least one cell", length)
        }
        NotNeighbours(a: NodeId, b: NodeId) {
            description("nodes are not grid neighbours")
            display("nodes {} and {} are not grid neighbours", a, b)
        }
        UnknownAlgorithm(name: String) {
            description("unknown search algorithm")
            display("unknown search algorithm '{}'", name)
        }
    }
}
