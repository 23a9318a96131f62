mod activation;
mod linear;

pub use activation::Relu;
pub use linear::Linear;
