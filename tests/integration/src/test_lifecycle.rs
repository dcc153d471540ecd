//! Create/delete lifecycle, dry runs, and routing errors.

#[cfg(test)]
mod tests {
    use crate::subnet::{SUBNETS, Subnet};
    use crate::{Ec2Harness, element_texts, error_code};

    #[test]
    fn test_should_create_subnet() {
        let mut ec2 = Ec2Harness::new();
        let response = ec2.call(&[
            ("Action", "CreateSubnet"),
            ("VpcId", "vpc-1"),
            ("CidrBlock", "10.0.1.0/24"),
            ("AvailabilityZone", "us-east-1b"),
        ]);

        assert_eq!(response.status.as_u16(), 200);
        assert!(response.body.starts_with(
            "<CreateSubnetResponse xmlns=\"http://ec2.amazonaws.com/doc/2016-11-15/\">"
        ));
        let ids = element_texts(&response.body, "subnetId");
        assert_eq!(ids.len(), 1);
        assert!(ids[0].starts_with("subnet-"));
        assert_eq!(
            element_texts(&response.body, "availableIpAddressCount"),
            vec!["251"]
        );
        assert_eq!(element_texts(&response.body, "availabilityZone"), vec!["us-east-1b"]);
        assert_eq!(element_texts(&response.body, "defaultForAz"), vec!["false"]);
        assert!(response.body.contains("<tagSet/>"));
        assert!(ec2.store.contains(SUBNETS, &ids[0]));
    }

    #[test]
    fn test_should_decode_form_body() {
        let mut ec2 = Ec2Harness::new();
        let response = ec2.call_form(
            "Action=CreateSubnet&Version=2016-11-15&VpcId=vpc-9&CidrBlock=10.0.0.0%2F16",
        );
        assert!(response.is_success(), "{}", response.body);
        assert_eq!(element_texts(&response.body, "vpcId"), vec!["vpc-9"]);
        assert_eq!(element_texts(&response.body, "cidrBlock"), vec!["10.0.0.0/16"]);
        assert_eq!(
            element_texts(&response.body, "availableIpAddressCount"),
            vec!["65531"]
        );
    }

    #[test]
    fn test_should_require_parameters() {
        let mut ec2 = Ec2Harness::new();
        let response = ec2.call(&[("Action", "CreateSubnet"), ("CidrBlock", "10.0.0.0/24")]);

        assert_eq!(response.status.as_u16(), 400);
        assert_eq!(error_code(&response.body).as_deref(), Some("MissingParameter"));
        assert_eq!(
            element_texts(&response.body, "Message"),
            vec!["The request must contain the parameter VpcId"]
        );
        assert!(!response.body.contains("CreateSubnetResponse"));
    }

    #[test]
    fn test_should_validate_cidr_block() {
        let mut ec2 = Ec2Harness::new();
        let response = ec2.call(&[
            ("Action", "CreateSubnet"),
            ("VpcId", "vpc-1"),
            ("CidrBlock", "not-a-cidr"),
        ]);
        assert_eq!(error_code(&response.body).as_deref(), Some("InvalidParameterValue"));

        let response = ec2.call(&[
            ("Action", "CreateSubnet"),
            ("VpcId", "vpc-1"),
            ("CidrBlock", "10.0.0.0/30"),
        ]);
        assert_eq!(error_code(&response.body).as_deref(), Some("InvalidSubnet.Range"));
        assert!(ec2.store.is_empty(SUBNETS));
    }

    #[test]
    fn test_should_not_create_on_dry_run() {
        let mut ec2 = Ec2Harness::new();
        let response = ec2.call(&[
            ("Action", "CreateSubnet"),
            ("VpcId", "vpc-1"),
            ("CidrBlock", "10.0.1.0/24"),
            ("DryRun", "true"),
        ]);

        assert_eq!(response.status.as_u16(), 412);
        assert_eq!(error_code(&response.body).as_deref(), Some("DryRunOperation"));
        assert_eq!(
            element_texts(&response.body, "Message"),
            vec!["Request would have succeeded, but DryRun flag is set."]
        );
        assert!(ec2.store.is_empty(SUBNETS));
    }

    #[test]
    fn test_should_report_validation_errors_before_dry_run() {
        let mut ec2 = Ec2Harness::new();
        let response = ec2.call(&[
            ("Action", "CreateSubnet"),
            ("CidrBlock", "10.0.1.0/24"),
            ("DryRun", "true"),
        ]);
        assert_eq!(error_code(&response.body).as_deref(), Some("MissingParameter"));
    }

    #[test]
    fn test_should_delete_subnet() {
        let mut ec2 = Ec2Harness::new();
        let id = ec2.create_subnet("10.0.1.0/24", &[]);

        let response = ec2.call(&[("Action", "DeleteSubnet"), ("SubnetId", id.as_str())]);
        assert!(response.is_success());
        assert_eq!(element_texts(&response.body, "return"), vec!["true"]);
        assert!(!ec2.store.contains(SUBNETS, &id));

        let response = ec2.call(&[("Action", "DeleteSubnet"), ("SubnetId", id.as_str())]);
        assert_eq!(response.status.as_u16(), 400);
        assert_eq!(
            error_code(&response.body).as_deref(),
            Some("InvalidSubnetID.NotFound")
        );
        assert!(response.body.contains(&format!(
            "<Message>The subnet ID &apos;{id}&apos; does not exist</Message>"
        )));
    }

    #[test]
    fn test_should_keep_subnet_on_dry_run_delete() {
        let mut ec2 = Ec2Harness::new();
        let id = ec2.create_subnet("10.0.1.0/24", &[]);

        let response = ec2.call(&[
            ("Action", "DeleteSubnet"),
            ("SubnetId", id.as_str()),
            ("DryRun", "true"),
        ]);
        assert_eq!(error_code(&response.body).as_deref(), Some("DryRunOperation"));
        assert!(ec2.store.contains(SUBNETS, &id));
    }

    #[test]
    fn test_should_block_delete_with_dependencies() {
        let mut ec2 = Ec2Harness::new();
        let id = ec2.create_subnet("10.0.1.0/24", &[]);
        if let Some(subnet) = ec2.store.get_mut::<Subnet>(SUBNETS, &id) {
            subnet.attached_interfaces = 1;
        }

        let response = ec2.call(&[("Action", "DeleteSubnet"), ("SubnetId", id.as_str())]);
        assert_eq!(error_code(&response.body).as_deref(), Some("DependencyViolation"));
        assert!(ec2.store.contains(SUBNETS, &id));
    }

    #[test]
    fn test_should_reject_unknown_and_missing_actions() {
        let mut ec2 = Ec2Harness::new();

        let response = ec2.call(&[("Action", "RunInstances")]);
        assert_eq!(error_code(&response.body).as_deref(), Some("InvalidAction"));

        let response = ec2.call(&[("VpcId", "vpc-1")]);
        assert_eq!(error_code(&response.body).as_deref(), Some("MissingAction"));
        assert_eq!(response.status.as_u16(), 400);
    }

    #[test]
    fn test_should_reject_malformed_dry_run_flag() {
        let mut ec2 = Ec2Harness::new();
        let response = ec2.call(&[
            ("Action", "CreateSubnet"),
            ("VpcId", "vpc-1"),
            ("CidrBlock", "10.0.1.0/24"),
            ("DryRun", "yes please"),
        ]);
        assert_eq!(error_code(&response.body).as_deref(), Some("InvalidParameterValue"));
        assert!(ec2.store.is_empty(SUBNETS));
    }
}
