//! Failure type shared by the data-access ports.

use super::define_port_error;

define_port_error! {
    /// Infrastructure failures raised by data-access adapters.
    ///
    /// These are never business outcomes: services propagate them untouched
    /// and the failure boundary turns them into a 500 response.
    pub enum RepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
    }
}
