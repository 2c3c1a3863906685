mod zeroheight_transformer;

pub use zeroheight_transformer::{transform, ZeroheightOutput};
