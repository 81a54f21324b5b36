//! Service layer
//!
//! One trait per external service the client talks to. Each trait is a thin,
//! stateless request/response seam with no business logic; the AWS SDK
//! implementations live next to their trait and are swapped for in-memory
//! fakes in tests.

mod batch;
mod logs;
mod stacks;
mod storage;

// Re-export traits
pub use batch::BatchApi;
pub use logs::LogApi;
pub use stacks::StackApi;
pub use storage::ObjectStore;

// Re-export implementations
pub use batch::AwsBatch;
pub use logs::AwsLogs;
pub use stacks::AwsStacks;
pub use storage::AwsObjectStore;
