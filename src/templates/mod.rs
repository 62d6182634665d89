// Individual template files
pub mod canvas_template;
pub mod instance_properties_template;
pub mod query_progress_template;

pub use canvas_template::CanvasTemplate;
pub use instance_properties_template::InstancePropertiesTemplate;
pub use query_progress_template::{ProgressRow, QueryProgressTemplate};
