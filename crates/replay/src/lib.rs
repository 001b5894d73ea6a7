pub use scenario::{replay, Summary};

mod scenario;
