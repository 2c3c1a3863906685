mod css_transformer;

pub use css_transformer::{transform, CssOutput, CssTransformer};
