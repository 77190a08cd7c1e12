// Create the Error, ErrorKind, ResultExt, and Result types for the library.
// Result is a typedef of std `Result` with the error type our own `Error`.
use error_chain::*;

error_chain! {

    errors {
        InvalidDimension(rows: usize, columns: usize) {
            description("invalid grid dimension")
            display("invalid grid dimensions {}x{}: rows and columns must both be positive", rows, columns)
        }
        OutOfBounds(row: usize, column: usize) {
            description("grid coordinate out of bounds")
            display("grid coordinate (row {}, column {}) is outside the grid", row, column)
        }
    }
}
