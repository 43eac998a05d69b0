//! Tests for bootstrap list resolution

use std::net::IpAddr;

use peernode::{
    crypto::save_keypair,
    discovery::{exclude_self, is_dnsaddr, StaticDns},
    generate_keypair, AddressResolver, Multiaddr, Node, NodeConfig, PeerId,
};

fn ip(raw: &str) -> IpAddr {
    raw.parse().unwrap()
}

fn resolver() -> AddressResolver {
    AddressResolver::new(
        StaticDns::new()
            .with_host("boot1.example.com", vec![ip("10.0.0.1")])
            .with_host("boot2.example.com", vec![ip("10.0.0.2"), ip("10.0.0.3"), ip("fd00::2")]),
    )
}

#[tokio::test]
async fn test_failing_host_is_dropped() {
    let peer = PeerId::random();
    let entries = vec![
        format!("/dns4/boot1.example.com/tcp/4001/p2p/{peer}"),
        "/dns4/unknown.example.com/tcp/4001".to_string(),
        "/ip4/192.168.1.7/tcp/4001".to_string(),
    ];

    let resolved = resolver().resolve(&entries).await;
    let expected: Vec<Multiaddr> = vec![
        format!("/ip4/10.0.0.1/tcp/4001/p2p/{peer}").parse().unwrap(),
        "/ip4/192.168.1.7/tcp/4001".parse().unwrap(),
    ];
    assert_eq!(resolved, expected);
}

#[tokio::test]
async fn test_host_expands_per_family() {
    let entries = vec!["/dns4/boot2.example.com/tcp/4001".to_string()];
    let resolved = resolver().resolve(&entries).await;
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].to_string(), "/ip4/10.0.0.2/tcp/4001");
    assert_eq!(resolved[1].to_string(), "/ip4/10.0.0.3/tcp/4001");

    let entries = vec!["/dns6/boot2.example.com/tcp/4001".to_string()];
    let resolved = resolver().resolve(&entries).await;
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].to_string(), "/ip6/fd00::2/tcp/4001");

    let entries = vec!["/dns/boot2.example.com/tcp/4001".to_string()];
    assert_eq!(resolver().resolve(&entries).await.len(), 3);
}

#[tokio::test]
async fn test_duplicates_collapse_in_order() {
    let entries = vec![
        "/ip4/10.0.0.1/tcp/4001".to_string(),
        "/dns4/boot2.example.com/tcp/4001".to_string(),
        "/dns4/boot1.example.com/tcp/4001".to_string(),
    ];

    let resolved = resolver().resolve(&entries).await;
    let rendered: Vec<String> = resolved.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec!["/ip4/10.0.0.1/tcp/4001", "/ip4/10.0.0.2/tcp/4001", "/ip4/10.0.0.3/tcp/4001"]
    );
}

#[tokio::test]
async fn test_node_excludes_itself_from_bootstrappers() {
    let dir = tempfile::tempdir().unwrap();
    let passfile = dir.path().join("passfile.json");
    let keypair = generate_keypair();
    save_keypair(&keypair, &passfile).unwrap();
    let me = keypair.peer_id().unwrap();
    let other = PeerId::random();

    let config = NodeConfig::builder(passfile)
        .bootstrapper(format!("/ip4/10.0.0.9/tcp/4001/p2p/{other}"))
        .bootstrapper(format!("/dns4/boot1.example.com/tcp/4001/p2p/{me}"))
        .bootstrapper("/dns4/boot2.example.com/tcp/4001")
        .bootstrapper("not a multiaddr")
        .build();

    let node = Node::from_config_with_resolver(config, &resolver()).await.unwrap();
    let rendered: Vec<String> = node.bootstrappers().iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            format!("/ip4/10.0.0.9/tcp/4001/p2p/{other}"),
            "/ip4/10.0.0.2/tcp/4001".to_string(),
            "/ip4/10.0.0.3/tcp/4001".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_dnsaddr_expands_every_record() {
    let first = PeerId::random();
    let second = PeerId::random();
    let dns = StaticDns::new()
        .with_host("boot1.example.com", vec![ip("10.0.0.1")])
        .with_txt(
            "_dnsaddr.boot.example",
            vec![
                format!("dnsaddr=/dns4/boot1.example.com/tcp/4001/p2p/{first}"),
                format!("dnsaddr=/ip4/10.0.0.5/tcp/4001/p2p/{second}"),
                "v=spf1 -all".to_string(),
            ],
        );

    let resolved = AddressResolver::new(dns).resolve(&["/dnsaddr/boot.example".to_string()]).await;
    let rendered: Vec<String> = resolved.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            format!("/ip4/10.0.0.1/tcp/4001/p2p/{first}"),
            format!("/ip4/10.0.0.5/tcp/4001/p2p/{second}"),
        ]
    );
    assert!(!resolved.iter().any(is_dnsaddr));
}

#[tokio::test]
async fn test_dnsaddr_follows_nested_records() {
    let peer = PeerId::random();
    let dns = StaticDns::new()
        .with_txt("_dnsaddr.boot.example", vec!["dnsaddr=/dnsaddr/sjc.boot.example".to_string()])
        .with_txt(
            "_dnsaddr.sjc.boot.example",
            vec![format!("dnsaddr=/ip4/10.0.1.1/tcp/4001/p2p/{peer}")],
        );

    let resolved = AddressResolver::new(dns).resolve(&["/dnsaddr/boot.example".to_string()]).await;
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].to_string(), format!("/ip4/10.0.1.1/tcp/4001/p2p/{peer}"));
}

#[tokio::test]
async fn test_dnsaddr_with_peer_suffix_keeps_matching_records() {
    let wanted = PeerId::random();
    let other = PeerId::random();
    let dns = StaticDns::new().with_txt(
        "_dnsaddr.boot.example",
        vec![
            format!("dnsaddr=/ip4/10.0.0.5/tcp/4001/p2p/{other}"),
            format!("dnsaddr=/ip4/10.0.0.6/tcp/4001/p2p/{wanted}"),
        ],
    );

    let entries = vec![format!("/dnsaddr/boot.example/p2p/{wanted}")];
    let resolved = AddressResolver::new(dns).resolve(&entries).await;
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].to_string(), format!("/ip4/10.0.0.6/tcp/4001/p2p/{wanted}"));
}

#[tokio::test]
async fn test_dnsaddr_without_records_is_dropped() {
    let entries = vec![
        "/dnsaddr/missing.example".to_string(),
        "/ip4/192.168.1.7/tcp/4001".to_string(),
    ];
    let resolved = resolver().resolve(&entries).await;
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].to_string(), "/ip4/192.168.1.7/tcp/4001");
}

#[tokio::test]
async fn test_shared_dnsaddr_record_listing_this_node_is_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let passfile = dir.path().join("passfile.json");
    let keypair = generate_keypair();
    save_keypair(&keypair, &passfile).unwrap();
    let me = keypair.peer_id().unwrap();
    let other = PeerId::random();

    let dns = StaticDns::new().with_txt(
        "_dnsaddr.boot.example",
        vec![
            format!("dnsaddr=/ip4/10.0.0.5/tcp/4001/p2p/{me}"),
            format!("dnsaddr=/ip4/10.0.0.6/tcp/4001/p2p/{other}"),
        ],
    );
    let resolver = AddressResolver::new(dns);

    let filtered = exclude_self(resolver.resolve(&["/dnsaddr/boot.example".to_string()]).await, &me);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].to_string(), format!("/ip4/10.0.0.6/tcp/4001/p2p/{other}"));

    let config = NodeConfig::builder(passfile).bootstrapper("/dnsaddr/boot.example").build();
    let node = Node::from_config_with_resolver(config, &resolver).await.unwrap();
    assert_eq!(node.bootstrappers(), filtered.as_slice());
}
