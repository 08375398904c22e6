use bix_domain::registry::{Channel, ImageRef, PolicyGrant, RegistryKey, RepositoryPolicy};
use serde_json::json;
use std::str::FromStr;

#[test]
fn policy_document_has_ecr_wire_shape() {
    let policy = RepositoryPolicy::from(&PolicyGrant::default());
    let value = serde_json::to_value(&policy).expect("serialize policy");

    assert_eq!(
        value,
        json!({
            "Version": "2008-10-17",
            "Statement": [{
                "Sid": "allow-bj-prod-cn",
                "Effect": "Allow",
                "Principal": { "AWS": "arn:aws-cn:iam::585145728788:root" },
                "Action": ["ecr:BatchGetImage", "ecr:GetDownloadUrlForLayer"]
            }]
        })
    );
}

#[test]
fn image_refs_render_and_retag() {
    let image = ImageRef {
        host: "436227880023.dkr.ecr.cn-northwest-1.amazonaws.com.cn".to_owned(),
        repository: "release/devops/devops-teamcity/hla-typer".to_owned(),
        tag: "1.2.0".to_owned(),
    };

    assert_eq!(
        image.to_string(),
        "436227880023.dkr.ecr.cn-northwest-1.amazonaws.com.cn/release/devops/devops-teamcity/hla-typer:1.2.0"
    );
    assert!(image.with_tag("latest").to_string().ends_with("hla-typer:latest"));
}

#[test]
fn keys_and_channels_parse_from_lowercase() {
    assert_eq!(RegistryKey::from_str("cn").ok(), Some(RegistryKey::Cn));
    assert_eq!(RegistryKey::Us.to_string(), "us");
    assert_eq!(Channel::Release.as_ref(), "release");
    assert!(Channel::from_str("nightly").is_err());
}

