pub mod vendor_error;

pub use vendor_error::{with_deadline, VendorError};
