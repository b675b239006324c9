use stackvars::parameter::{self, REGISTRY};

const DOCUMENTED: [(&str, &str); 23] = [
    ("CFNString", "String"),
    ("CFNNumber", "Number"),
    ("CFNNumberList", "List<Number>"),
    ("CFNCommaDelimitedList", "CommaDelimitedList"),
    ("EC2AvailabilityZoneName", "AWS::EC2::AvailabilityZone::Name"),
    ("EC2ImageId", "AWS::EC2::Image::Id"),
    ("EC2InstanceId", "AWS::EC2::Instance::Id"),
    ("EC2KeyPairKeyName", "AWS::EC2::KeyPair::KeyName"),
    ("EC2SecurityGroupGroupName", "AWS::EC2::SecurityGroup::GroupName"),
    ("EC2SecurityGroupId", "AWS::EC2::SecurityGroup::Id"),
    ("EC2SubnetId", "AWS::EC2::Subnet::Id"),
    ("EC2VolumeId", "AWS::EC2::Volume::Id"),
    ("EC2VPCId", "AWS::EC2::VPC::Id"),
    ("Route53HostedZoneId", "AWS::Route53::HostedZone::Id"),
    ("EC2AvailabilityZoneNameList", "List<AWS::EC2::AvailabilityZone::Name>"),
    ("EC2ImageIdList", "List<AWS::EC2::Image::Id>"),
    ("EC2InstanceIdList", "List<AWS::EC2::Instance::Id>"),
    ("EC2SecurityGroupGroupNameList", "List<AWS::EC2::SecurityGroup::GroupName>"),
    ("EC2SecurityGroupIdList", "List<AWS::EC2::SecurityGroup::Id>"),
    ("EC2SubnetIdList", "List<AWS::EC2::Subnet::Id>"),
    ("EC2VolumeIdList", "List<AWS::EC2::Volume::Id>"),
    ("EC2VPCIdList", "List<AWS::EC2::VPC::Id>"),
    ("Route53HostedZoneIdList", "List<AWS::Route53::HostedZone::Id>"),
];

#[test]
fn every_tag_round_trips_its_provider_string() {
    assert_eq!(REGISTRY.len(), DOCUMENTED.len());
    for (name, parameter_type) in DOCUMENTED {
        let tag = parameter::lookup(name).unwrap_or_else(|| panic!("missing tag {}", name));
        assert_eq!(tag.parameter_type(), parameter_type, "tag {}", name);
        assert_eq!(parameter::by_parameter_type(parameter_type), Some(tag));
    }
}

#[test]
fn named_constants_match_the_table() {
    assert_eq!(parameter::EC2_VPC_ID_LIST.parameter_type(), "List<AWS::EC2::VPC::Id>");
    assert_eq!(parameter::CFN_STRING.name(), "CFNString");
    assert_eq!(parameter::ROUTE53_HOSTED_ZONE_ID.to_string(), "AWS::Route53::HostedZone::Id");
}

#[test]
fn registry_keeps_declaration_order() {
    let names: Vec<&str> = REGISTRY.iter().map(|t| t.name()).collect();
    let documented: Vec<&str> = DOCUMENTED.iter().map(|(n, _)| *n).collect();
    assert_eq!(names, documented);
}
