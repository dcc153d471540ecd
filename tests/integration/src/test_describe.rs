//! `DescribeSubnets`: id selection, filters, and pagination.

#[cfg(test)]
mod tests {
    use ruststack_ec2_core::{Ec2Config, UnknownFilterPolicy};

    use crate::{Ec2Harness, element_texts, error_code};

    fn describe(ec2: &mut Ec2Harness, extra: &[(&str, &str)]) -> String {
        let mut pairs = vec![("Action", "DescribeSubnets")];
        pairs.extend_from_slice(extra);
        ec2.call(&pairs).body
    }

    fn name_tag(name: &str) -> Vec<(&'static str, String)> {
        vec![
            ("TagSpecification.1.ResourceType", "subnet".to_owned()),
            ("TagSpecification.1.Tags.1.Key", "Name".to_owned()),
            ("TagSpecification.1.Tags.1.Value", name.to_owned()),
        ]
    }

    fn create_named(ec2: &mut Ec2Harness, cidr_block: &str, name: &str) -> String {
        let tags = name_tag(name);
        let extra: Vec<(&str, &str)> = tags.iter().map(|(k, v)| (*k, v.as_str())).collect();
        ec2.create_subnet(cidr_block, &extra)
    }

    #[test]
    fn test_should_describe_all_subnets_as_wrapped_set() {
        let mut ec2 = Ec2Harness::new();
        let a = ec2.create_subnet("10.0.1.0/24", &[]);
        let b = ec2.create_subnet("10.0.2.0/24", &[]);

        let body = describe(&mut ec2, &[]);
        assert!(body.starts_with("<DescribeSubnetsResponse"));
        assert!(body.contains("<subnetSet>"));
        assert!(!body.contains("<subnet>"));
        assert_eq!(body.matches("<item>").count(), 2);
        assert_eq!(element_texts(&body, "subnetId"), vec![a, b]);
        assert!(!body.contains("nextToken"));
    }

    #[test]
    fn test_should_render_empty_subnet_set() {
        let mut ec2 = Ec2Harness::new();
        let body = describe(&mut ec2, &[]);
        assert!(body.contains("<subnetSet/>"));
    }

    #[test]
    fn test_should_filter_by_name_tag() {
        let mut ec2 = Ec2Harness::new();
        let web = create_named(&mut ec2, "10.0.1.0/24", "web");
        let _api = create_named(&mut ec2, "10.0.2.0/24", "api");
        let db = create_named(&mut ec2, "10.0.3.0/24", "db");

        let body = describe(
            &mut ec2,
            &[
                ("Filter.1.Name", "tag:Name"),
                ("Filter.1.Values.1", "web"),
                ("Filter.1.Values.2", "db"),
            ],
        );
        assert_eq!(element_texts(&body, "subnetId"), vec![web, db]);
    }

    #[test]
    fn test_should_and_multiple_filters() {
        let mut ec2 = Ec2Harness::new();
        let a = ec2.create_subnet("10.0.1.0/24", &[("AvailabilityZone", "us-east-1a")]);
        let _b = ec2.create_subnet("10.0.2.0/24", &[("AvailabilityZone", "us-east-1b")]);

        let body = describe(
            &mut ec2,
            &[
                ("Filter.1.Name", "availability-zone"),
                ("Filter.1.Value.1", "us-east-1a"),
                ("Filter.2.Name", "cidr-block"),
                ("Filter.2.Values.1", "10.0.*"),
                ("Filter.3.Name", "default-for-az"),
                ("Filter.3.Values.1", "FALSE"),
            ],
        );
        assert_eq!(element_texts(&body, "subnetId"), vec![a]);
    }

    #[test]
    fn test_should_select_ids_in_index_order() {
        let mut ec2 = Ec2Harness::new();
        let a = ec2.create_subnet("10.0.1.0/24", &[]);
        let b = ec2.create_subnet("10.0.2.0/24", &[]);
        let _c = ec2.create_subnet("10.0.3.0/24", &[]);

        let body = describe(
            &mut ec2,
            &[("SubnetId.7", a.as_str()), ("SubnetId.2", b.as_str())],
        );
        assert_eq!(element_texts(&body, "subnetId"), vec![b, a]);
    }

    #[test]
    fn test_should_report_unknown_subnet_id() {
        let mut ec2 = Ec2Harness::new();
        ec2.create_subnet("10.0.1.0/24", &[]);

        let body = describe(&mut ec2, &[("SubnetId.1", "subnet-missing")]);
        assert_eq!(error_code(&body).as_deref(), Some("InvalidSubnetID.NotFound"));
    }

    #[test]
    fn test_should_page_through_subnets() {
        let mut ec2 = Ec2Harness::new();
        let created: Vec<String> = (1..=12)
            .map(|i| ec2.create_subnet(&format!("10.0.{i}.0/24"), &[]))
            .collect();

        let mut seen = Vec::new();
        let mut token: Option<String> = None;
        let mut calls = 0;
        loop {
            calls += 1;
            let mut extra = vec![("MaxResults", "5")];
            if let Some(token) = token.as_deref() {
                extra.push(("NextToken", token));
            }
            let body = describe(&mut ec2, &extra);
            let ids = element_texts(&body, "subnetId");
            assert!(ids.len() <= 5);
            seen.extend(ids);
            match element_texts(&body, "nextToken").into_iter().next() {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        assert_eq!(calls, 3);
        assert_eq!(seen, created);
    }

    #[test]
    fn test_should_return_next_token_of_first_page() {
        let mut ec2 = Ec2Harness::new();
        for i in 1..=6 {
            ec2.create_subnet(&format!("10.0.{i}.0/24"), &[]);
        }
        let body = describe(&mut ec2, &[("MaxResults", "5")]);
        assert_eq!(element_texts(&body, "nextToken"), vec!["5"]);
    }

    #[test]
    fn test_should_reject_max_results_out_of_range() {
        let mut ec2 = Ec2Harness::new();
        let body = describe(&mut ec2, &[("MaxResults", "2")]);
        assert_eq!(error_code(&body).as_deref(), Some("InvalidParameterValue"));
        assert!(body.contains("Expecting a value between 5 and 1000"));

        let body = describe(&mut ec2, &[("MaxResults", "many")]);
        assert_eq!(error_code(&body).as_deref(), Some("InvalidParameterValue"));
    }

    #[test]
    fn test_should_reject_ids_with_max_results() {
        let mut ec2 = Ec2Harness::new();
        let id = ec2.create_subnet("10.0.1.0/24", &[]);
        let body = describe(&mut ec2, &[("SubnetId.1", id.as_str()), ("MaxResults", "5")]);
        assert_eq!(
            error_code(&body).as_deref(),
            Some("InvalidParameterCombination")
        );
    }

    #[test]
    fn test_should_use_configured_default_page_size() {
        let mut ec2 = Ec2Harness::with_config(Ec2Config {
            default_max_results: 2,
            ..Ec2Config::default()
        });
        for i in 1..=3 {
            ec2.create_subnet(&format!("10.0.{i}.0/24"), &[]);
        }
        let body = describe(&mut ec2, &[]);
        assert_eq!(element_texts(&body, "subnetId").len(), 2);
        assert_eq!(element_texts(&body, "nextToken"), vec!["2"]);
    }

    #[test]
    fn test_should_restart_on_unparsable_token() {
        let mut ec2 = Ec2Harness::new();
        let first = ec2.create_subnet("10.0.1.0/24", &[]);
        let body = describe(&mut ec2, &[("NextToken", "not-a-number")]);
        assert_eq!(element_texts(&body, "subnetId"), vec![first]);
    }

    #[test]
    fn test_should_honor_unknown_filter_policy() {
        let unknown = [("Filter.1.Name", "owner-id"), ("Filter.1.Values.1", "123")];

        let mut ec2 = Ec2Harness::new();
        ec2.create_subnet("10.0.1.0/24", &[]);
        let body = describe(&mut ec2, &unknown);
        assert_eq!(element_texts(&body, "subnetId").len(), 1);

        let mut ec2 = Ec2Harness::with_config(Ec2Config {
            unknown_filter_policy: UnknownFilterPolicy::MatchNone,
            ..Ec2Config::default()
        });
        ec2.create_subnet("10.0.1.0/24", &[]);
        let body = describe(&mut ec2, &unknown);
        assert!(body.contains("<subnetSet/>"));

        let mut ec2 = Ec2Harness::with_config(Ec2Config {
            unknown_filter_policy: UnknownFilterPolicy::Reject,
            ..Ec2Config::default()
        });
        ec2.create_subnet("10.0.1.0/24", &[]);
        let body = describe(&mut ec2, &unknown);
        assert_eq!(error_code(&body).as_deref(), Some("InvalidFilter"));
    }

    #[test]
    fn test_should_short_circuit_dry_run_describe() {
        let mut ec2 = Ec2Harness::new();
        let body = describe(&mut ec2, &[("DryRun", "true")]);
        assert_eq!(error_code(&body).as_deref(), Some("DryRunOperation"));
    }
}
