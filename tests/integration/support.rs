use serde_json::Value;
use stackvars::{Params, PropertyFactory, ResourceFactory, TemplateType};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum FixtureError {
    #[error("{0}: required property {1} missing")]
    Required(String, &'static str),
    #[error("unexpected property {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecurityGroup {
    pub title: String,
    pub description: Option<String>,
}

impl TemplateType for SecurityGroup {
    type Error = FixtureError;

    fn validate_props(&self) -> Result<(), Self::Error> {
        match self.description {
            Some(_) => Ok(()),
            None => Err(FixtureError::Required(self.title.clone(), "GroupDescription")),
        }
    }
}

impl ResourceFactory for SecurityGroup {
    const RESOURCE_TYPE: &'static str = "AWS::EC2::SecurityGroup";

    fn from_dict(title: &str, params: &Params) -> Result<Self, Self::Error> {
        if let Some(key) = params.keys().find(|k| *k != "GroupDescription") {
            return Err(FixtureError::Unexpected(key.clone()));
        }
        Ok(SecurityGroup {
            title: title.to_string(),
            description: params
                .get("GroupDescription")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub title: String,
}

impl TemplateType for Bucket {
    type Error = FixtureError;
    const RESOURCE_NAME: Option<&'static str> = Some("S3Bucket");

    fn validate_props(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl ResourceFactory for Bucket {
    const RESOURCE_TYPE: &'static str = "AWS::S3::Bucket";

    fn from_dict(title: &str, _params: &Params) -> Result<Self, Self::Error> {
        Ok(Bucket {
            title: title.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl TemplateType for Tag {
    type Error = FixtureError;

    fn validate_props(&self) -> Result<(), Self::Error> {
        if self.key.is_empty() {
            return Err(FixtureError::Required("Tag".to_string(), "Key"));
        }
        Ok(())
    }
}

impl PropertyFactory for Tag {
    fn from_dict(params: &Params) -> Result<Self, Self::Error> {
        let field = |name: &str| {
            params
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Ok(Tag {
            key: field("k"),
            value: field("v"),
        })
    }
}
