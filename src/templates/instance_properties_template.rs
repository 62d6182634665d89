use askama::Template;
use crate::properties::InstancePropertySheet;

#[derive(Template)]
#[template(path = "instance_properties.html")]
pub struct InstancePropertiesTemplate<'a> {
    pub region: &'a str,
    pub sheet: &'a InstancePropertySheet,
}
