// Mock social feed around a reference thumbnail.
// Sampling is pure and seeded by a context key; pool discovery is the only I/O here.

pub mod handlers;
pub mod pool;
pub mod sampler;
pub mod seed;
