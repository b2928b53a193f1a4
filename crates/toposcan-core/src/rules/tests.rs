//! Tests for the gluing policy.

use super::*;

fn side(param: i32, port: Port) -> Endpoint {
    Endpoint::new(BlockKind::SideLink, param, port)
}

fn interior(param: i32, port: Port) -> Endpoint {
    Endpoint::new(BlockKind::InteriorLink, param, port)
}

fn node(param: i32, port: Port) -> Endpoint {
    Endpoint::new(BlockKind::Node, param, port)
}

#[test]
fn test_conditions() {
    assert!(NodeCondition::Above(4).holds(5));
    assert!(!NodeCondition::Above(4).holds(4));
    assert!(NodeCondition::Below(6).holds(5));
    assert!(!NodeCondition::Below(6).holds(6));
    assert!(NodeCondition::Outside(6, 8).holds(5));
    assert!(NodeCondition::Outside(6, 8).holds(9));
    assert!(!NodeCondition::Outside(6, 8).holds(7));
}

#[test]
fn test_side_eleven_limited_to_small_nodes() {
    let rules = RuleTable::builtin();
    assert!(rules.check(side(11, Port::Right), node(4, Port::Left)).is_ok());
    assert_eq!(
        rules.check(side(11, Port::Right), node(9, Port::Left)),
        Err(TopoError::BannedPair {
            link_kind: BlockKind::SideLink,
            link_param: 11,
            node_param: 9,
        })
    );
}

#[test]
fn test_rules_apply_in_either_order() {
    let rules = RuleTable::builtin();
    let forward = rules.check(side(11, Port::Right), node(9, Port::Left));
    let backward = rules.check(node(9, Port::Left), side(11, Port::Right));
    assert!(forward.is_err());
    assert_eq!(forward, backward);
}

#[test]
fn test_port_ban_depends_on_orientation() {
    let rules = RuleTable::builtin();
    // 32 is fine on a 6 from its left end, not from its right end
    assert!(rules
        .check(interior(32, Port::Left), node(6, Port::Right))
        .is_ok());
    assert!(matches!(
        rules.check(interior(32, Port::Right), node(6, Port::Left)),
        Err(TopoError::BannedPortPair { link_param: 32, .. })
    ));
}

#[test]
fn test_side_only_rules_do_not_leak_into_interior() {
    let rules = RuleTable::builtin();
    assert!(rules.check(side(991, Port::Right), node(6, Port::Left)).is_err());
    assert!(rules.side.bans_pair(991, 6));
    assert!(!rules.interior.bans_pair(991, 6));

}

#[test]
fn test_side_24_port_bans_match_interior() {
    let rules = RuleTable::builtin();
    assert!(!rules.side.bans_ports(24, 4, Port::Left, Port::Right));
    assert!(rules.side.bans_ports(24, 5, Port::Left, Port::Right));
    assert!(rules.side.bans_ports(24, 4, Port::Right, Port::Left));
    assert!(!rules.side.bans_ports(24, 6, Port::Right, Port::Left));
    assert!(rules
        .check(side(24, Port::Left), node(4, Port::Right))
        .is_ok());

    assert!(rules.interior.bans_ports(24, 4, Port::Right, Port::Left));
    assert!(!rules.interior.bans_ports(24, 4, Port::Left, Port::Right));
}

#[test]
fn test_instanton_glues_by_its_tip() {
    let rules = RuleTable::builtin();
    assert!(rules.check(side(883, Port::Right), node(6, Port::Left)).is_ok());
    assert!(rules.check(side(883, Port::Left), node(6, Port::Right)).is_err());
    assert!(rules.check(side(883, Port::Right), node(3, Port::Left)).is_err());
}

#[test]
fn test_structural_ban_ignores_params() {
    let rules = RuleTable::permissive();
    for port in [Port::Left, Port::Right, Port::Custom] {
        assert!(matches!(
            rules.check(side(1, port), interior(22, Port::Left)),
            Err(TopoError::ForbiddenAdjacency { .. })
        ));
        assert!(matches!(
            rules.check(interior(22, port), side(1, Port::Left)),
            Err(TopoError::ForbiddenAdjacency { .. })
        ));
    }
}

#[test]
fn test_non_link_pairs_are_unchecked() {
    let rules = RuleTable::builtin();
    let ext = Endpoint::new(BlockKind::External, 12, Port::Left);
    assert!(rules.check(side(11, Port::Right), ext).is_ok());
    assert!(rules.check(node(9, Port::Right), node(12, Port::Left)).is_ok());
}

#[test]
fn test_builtin_sizes() {
    let rules = RuleTable::builtin();
    assert_eq!(rules.interior.pairs.len(), 6);
    assert_eq!(rules.interior.ports.len(), 20);
    assert!(rules.side.len() > rules.interior.len());
    assert!(RuleTable::permissive().side.is_empty());
}
