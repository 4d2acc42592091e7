use super::*;

#[test]
fn standard_menu_is_valid() {
    let menu = NavMenu::standard().unwrap();
    assert_eq!(menu.roots().len(), 9);
    assert_eq!(menu.leaves().len(), 20);
}

#[test]
fn standard_menu_keeps_declared_order() {
    let menu = NavMenu::standard().unwrap();
    let keys: Vec<&str> = menu.roots().iter().map(NavNode::key).collect();
    assert_eq!(
        keys,
        [
            "dashboard",
            "product",
            "purchaseSection",
            "saleSection",
            "accountSection",
            "reportSection",
            "hrSection",
            "pos",
            "settings"
        ]
    );
    assert_eq!(menu.leaves()[0].route, "/dashboard");
    assert_eq!(menu.leaves()[1].key, "productCategory");
}

#[test]
fn roles_leaf_routes_to_role_screen() {
    let menu = NavMenu::standard().unwrap();
    let leaf = menu.leaf_for_route("/role").unwrap();
    assert_eq!(leaf.key, "roleAndPermissions");
    assert_eq!(leaf.icon, Icon::UserSwitch);
    assert_eq!(leaf.icon.component_name(), "UserSwitchOutlined");
}

#[test]
fn route_lookup_ignores_trailing_slash() {
    let menu = NavMenu::standard().unwrap();
    assert_eq!(menu.leaf_for_route("/account").map(|l| l.key), Some("accountList"));
    assert_eq!(menu.leaf_for_route("/customer/").map(|l| l.key), Some("customers"));
    assert!(menu.leaf_for_route("/nowhere").is_none());
}

#[test]
fn find_reaches_nested_nodes() {
    let menu = NavMenu::standard().unwrap();
    assert!(matches!(menu.find("hrSection"), Some(NavNode::Group(_))));
    assert!(matches!(menu.find("staffs"), Some(NavNode::Leaf(l)) if l.route == "/hr/staffs"));
    assert!(menu.find("missing").is_none());
}

#[test]
fn trail_lists_labels_from_root() {
    let menu = NavMenu::standard().unwrap();
    assert_eq!(menu.trail("balanceSheet").unwrap(), ["RAPPORT", "Bilan"]);
    assert_eq!(menu.trail("pos").unwrap(), ["BOUTIQUE"]);
    assert!(menu.trail("missing").is_none());
}

// =============================================================
// Validation
// =============================================================

#[test]
fn empty_menu_is_rejected() {
    assert_eq!(NavMenu::new(vec![]), Err(MenuError::Empty));
}

#[test]
fn duplicate_key_is_rejected() {
    let err = NavMenu::new(vec![
        NavNode::leaf("a", "A", "/a", Icon::Home),
        NavNode::group("g", "G", Icon::Shop, vec![NavNode::leaf("a", "A2", "/a2", Icon::Home)]),
    ])
    .unwrap_err();
    assert_eq!(err, MenuError::DuplicateKey("a".to_owned()));
}

#[test]
fn duplicate_route_is_rejected_modulo_trailing_slash() {
    let err = NavMenu::new(vec![
        NavNode::leaf("a", "A", "/account", Icon::Home),
        NavNode::leaf("b", "B", "/account/", Icon::Home),
    ])
    .unwrap_err();
    assert_eq!(err, MenuError::DuplicateRoute("/account/".to_owned()));
}

#[test]
fn empty_group_is_rejected() {
    let err = NavMenu::new(vec![NavNode::group("g", "G", Icon::Shop, vec![])]).unwrap_err();
    assert_eq!(err, MenuError::EmptyGroup("g".to_owned()));
}

#[test]
fn relative_route_is_rejected() {
    let err = NavMenu::new(vec![NavNode::leaf("a", "A", "role", Icon::Home)]).unwrap_err();
    assert!(matches!(err, MenuError::InvalidRoute { .. }));
}

#[test]
fn blank_label_is_rejected() {
    let err = NavMenu::new(vec![NavNode::leaf("a", "  ", "/a", Icon::Home)]).unwrap_err();
    assert_eq!(err, MenuError::EmptyLabel("a".to_owned()));
}
