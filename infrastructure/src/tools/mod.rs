//! Tool host adapter
//!
//! Maps raw tool invocations from the host onto the application's use cases.
//!
//! | Tool | Behaviour |
//! |------|-----------|
//! | `analyze_invoice` | Resolve an invoice under the data directory and analyze it |
//! | `hello_mcp` | Fixed greeting, useful as a liveness probe |

mod executor;

pub use executor::{ANALYZE_INVOICE, HELLO, HELLO_GREETING, InvoiceToolExecutor};
