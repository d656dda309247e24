pub mod normalize;
pub mod pipeline;
pub mod retry;
pub mod trigger;
