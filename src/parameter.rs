//! Provider Parameter Types
//!
//! A variable declared with a [`ParameterTypeTag`] is not converted: its value
//! goes to the provider as a stack parameter of the tagged type.

use crate::error::VariableError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Named provider parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParameterTypeTag {
    name: &'static str,
    parameter_type: &'static str,
}

impl ParameterTypeTag {
    pub const fn new(name: &'static str, parameter_type: &'static str) -> Self {
        Self {
            name,
            parameter_type,
        }
    }

    /// Symbolic name, e.g. `EC2VPCId`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Provider type string, e.g. `AWS::EC2::VPC::Id`.
    pub fn parameter_type(&self) -> &'static str {
        self.parameter_type
    }

    /// Whether the provider expects a comma-joined list for this type.
    pub fn is_list(&self) -> bool {
        self.parameter_type == "CommaDelimitedList" || self.element_type().is_some()
    }

    /// Element type of a `List<...>` parameter type.
    pub fn element_type(&self) -> Option<&'static str> {
        self.parameter_type
            .strip_prefix("List<")
            .and_then(|rest| rest.strip_suffix('>'))
    }
}

impl fmt::Display for ParameterTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.parameter_type)
    }
}

pub const CFN_STRING: ParameterTypeTag = ParameterTypeTag::new("CFNString", "String");
pub const CFN_NUMBER: ParameterTypeTag = ParameterTypeTag::new("CFNNumber", "Number");
pub const CFN_NUMBER_LIST: ParameterTypeTag = ParameterTypeTag::new("CFNNumberList", "List<Number>");
pub const CFN_COMMA_DELIMITED_LIST: ParameterTypeTag =
    ParameterTypeTag::new("CFNCommaDelimitedList", "CommaDelimitedList");
pub const EC2_AVAILABILITY_ZONE_NAME: ParameterTypeTag =
    ParameterTypeTag::new("EC2AvailabilityZoneName", "AWS::EC2::AvailabilityZone::Name");
pub const EC2_IMAGE_ID: ParameterTypeTag = ParameterTypeTag::new("EC2ImageId", "AWS::EC2::Image::Id");
pub const EC2_INSTANCE_ID: ParameterTypeTag =
    ParameterTypeTag::new("EC2InstanceId", "AWS::EC2::Instance::Id");
pub const EC2_KEY_PAIR_KEY_NAME: ParameterTypeTag =
    ParameterTypeTag::new("EC2KeyPairKeyName", "AWS::EC2::KeyPair::KeyName");
pub const EC2_SECURITY_GROUP_GROUP_NAME: ParameterTypeTag =
    ParameterTypeTag::new("EC2SecurityGroupGroupName", "AWS::EC2::SecurityGroup::GroupName");
pub const EC2_SECURITY_GROUP_ID: ParameterTypeTag =
    ParameterTypeTag::new("EC2SecurityGroupId", "AWS::EC2::SecurityGroup::Id");
pub const EC2_SUBNET_ID: ParameterTypeTag = ParameterTypeTag::new("EC2SubnetId", "AWS::EC2::Subnet::Id");
pub const EC2_VOLUME_ID: ParameterTypeTag = ParameterTypeTag::new("EC2VolumeId", "AWS::EC2::Volume::Id");
pub const EC2_VPC_ID: ParameterTypeTag = ParameterTypeTag::new("EC2VPCId", "AWS::EC2::VPC::Id");
pub const ROUTE53_HOSTED_ZONE_ID: ParameterTypeTag =
    ParameterTypeTag::new("Route53HostedZoneId", "AWS::Route53::HostedZone::Id");
pub const EC2_AVAILABILITY_ZONE_NAME_LIST: ParameterTypeTag = ParameterTypeTag::new(
    "EC2AvailabilityZoneNameList",
    "List<AWS::EC2::AvailabilityZone::Name>",
);
pub const EC2_IMAGE_ID_LIST: ParameterTypeTag =
    ParameterTypeTag::new("EC2ImageIdList", "List<AWS::EC2::Image::Id>");
pub const EC2_INSTANCE_ID_LIST: ParameterTypeTag =
    ParameterTypeTag::new("EC2InstanceIdList", "List<AWS::EC2::Instance::Id>");
pub const EC2_SECURITY_GROUP_GROUP_NAME_LIST: ParameterTypeTag = ParameterTypeTag::new(
    "EC2SecurityGroupGroupNameList",
    "List<AWS::EC2::SecurityGroup::GroupName>",
);
pub const EC2_SECURITY_GROUP_ID_LIST: ParameterTypeTag =
    ParameterTypeTag::new("EC2SecurityGroupIdList", "List<AWS::EC2::SecurityGroup::Id>");
pub const EC2_SUBNET_ID_LIST: ParameterTypeTag =
    ParameterTypeTag::new("EC2SubnetIdList", "List<AWS::EC2::Subnet::Id>");
pub const EC2_VOLUME_ID_LIST: ParameterTypeTag =
    ParameterTypeTag::new("EC2VolumeIdList", "List<AWS::EC2::Volume::Id>");
pub const EC2_VPC_ID_LIST: ParameterTypeTag =
    ParameterTypeTag::new("EC2VPCIdList", "List<AWS::EC2::VPC::Id>");
pub const ROUTE53_HOSTED_ZONE_ID_LIST: ParameterTypeTag =
    ParameterTypeTag::new("Route53HostedZoneIdList", "List<AWS::Route53::HostedZone::Id>");

/// Every declared parameter type tag, in declaration order.
pub static REGISTRY: [ParameterTypeTag; 23] = [
    CFN_STRING,
    CFN_NUMBER,
    CFN_NUMBER_LIST,
    CFN_COMMA_DELIMITED_LIST,
    EC2_AVAILABILITY_ZONE_NAME,
    EC2_IMAGE_ID,
    EC2_INSTANCE_ID,
    EC2_KEY_PAIR_KEY_NAME,
    EC2_SECURITY_GROUP_GROUP_NAME,
    EC2_SECURITY_GROUP_ID,
    EC2_SUBNET_ID,
    EC2_VOLUME_ID,
    EC2_VPC_ID,
    ROUTE53_HOSTED_ZONE_ID,
    EC2_AVAILABILITY_ZONE_NAME_LIST,
    EC2_IMAGE_ID_LIST,
    EC2_INSTANCE_ID_LIST,
    EC2_SECURITY_GROUP_GROUP_NAME_LIST,
    EC2_SECURITY_GROUP_ID_LIST,
    EC2_SUBNET_ID_LIST,
    EC2_VOLUME_ID_LIST,
    EC2_VPC_ID_LIST,
    ROUTE53_HOSTED_ZONE_ID_LIST,
];

/// Find a tag by its symbolic name.
pub fn lookup(name: &str) -> Option<&'static ParameterTypeTag> {
    REGISTRY.iter().find(|tag| tag.name == name)
}

/// Find a tag by its provider type string.
pub fn by_parameter_type(parameter_type: &str) -> Option<&'static ParameterTypeTag> {
    REGISTRY.iter().find(|tag| tag.parameter_type == parameter_type)
}

/// A configured value bound for a provider parameter.
///
/// Booleans and integers are stringified; strings and lists pass through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterValue {
    name: String,
    value: Value,
}

impl ParameterValue {
    pub fn new(name: impl Into<String>, value: Value) -> Result<Self, VariableError> {
        let name = name.into();
        let value = match value {
            Value::Bool(b) => {
                debug!(parameter = %name, value = b, "converting boolean parameter to string");
                Value::String(b.to_string())
            }
            Value::Number(n) if n.is_i64() || n.is_u64() => {
                debug!(parameter = %name, value = %n, "converting integer parameter to string");
                Value::String(n.to_string())
            }
            value @ (Value::String(_) | Value::Array(_)) => value,
            other => {
                return Err(VariableError::InvalidParameterValue {
                    name,
                    value: other.to_string(),
                })
            }
        };
        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The string submitted to the provider; lists are comma-joined.
    pub fn to_parameter_value(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        }
    }
}
