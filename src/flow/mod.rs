pub mod definition;
pub mod document;
pub mod normalize;
pub mod step;

pub use definition::*;
pub use normalize::{IntoSteps, normalize_steps, parse_step_list};
pub use step::*;
