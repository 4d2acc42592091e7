//! Navigation menu: a static tree of groups and routed leaves.
//!
//! DESIGN
//! ======
//! The tree is plain data, built once and validated by [`NavMenu::new`]
//! before anything renders it. Rendering maps 1:1 onto the tree; there is no
//! per-role filtering here. The "roles and permissions" leaf only routes to
//! the role screen, enforcement is the backend's job.

use std::collections::HashSet;

#[cfg(test)]
#[path = "menu_test.rs"]
mod tests;

// =============================================================================
// TYPES
// =============================================================================

/// Icons used by the menu. Names follow the toolkit's outlined icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Home,
    Shop,
    UnorderedList,
    PlusSquare,
    MinusSquare,
    User,
    Check,
    Inbox,
    Fund,
    FileDone,
    File,
    FileSync,
    UsergroupAdd,
    UserSwitch,
    ShoppingCart,
    Setting,
}

impl Icon {
    /// Toolkit component name, e.g. `HomeOutlined`.
    #[must_use]
    pub fn component_name(self) -> &'static str {
        match self {
            Self::Home => "HomeOutlined",
            Self::Shop => "ShopOutlined",
            Self::UnorderedList => "UnorderedListOutlined",
            Self::PlusSquare => "PlusSquareOutlined",
            Self::MinusSquare => "MinusSquareOutlined",
            Self::User => "UserOutlined",
            Self::Check => "CheckOutlined",
            Self::Inbox => "InboxOutlined",
            Self::Fund => "FundOutlined",
            Self::FileDone => "FileDoneOutlined",
            Self::File => "FileOutlined",
            Self::FileSync => "FileSyncOutlined",
            Self::UsergroupAdd => "UsergroupAddOutlined",
            Self::UserSwitch => "UserSwitchOutlined",
            Self::ShoppingCart => "ShoppingCartOutlined",
            Self::Setting => "SettingOutlined",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLeaf {
    pub key: &'static str,
    pub label: &'static str,
    pub route: &'static str,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavGroup {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: Icon,
    pub children: Vec<NavNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavNode {
    Leaf(NavLeaf),
    Group(NavGroup),
}

impl NavNode {
    #[must_use]
    pub fn leaf(key: &'static str, label: &'static str, route: &'static str, icon: Icon) -> Self {
        Self::Leaf(NavLeaf { key, label, route, icon })
    }

    #[must_use]
    pub fn group(key: &'static str, label: &'static str, icon: Icon, children: Vec<NavNode>) -> Self {
        Self::Group(NavGroup { key, label, icon, children })
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Leaf(leaf) => leaf.key,
            Self::Group(group) => group.key,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Leaf(leaf) => leaf.label,
            Self::Group(group) => group.label,
        }
    }

    #[must_use]
    pub fn icon(&self) -> Icon {
        match self {
            Self::Leaf(leaf) => leaf.icon,
            Self::Group(group) => group.icon,
        }
    }
}

/// A malformed menu tree, reported at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("menu has no entries")]
    Empty,
    #[error("duplicate menu key `{0}`")]
    DuplicateKey(String),
    #[error("duplicate menu route `{0}`")]
    DuplicateRoute(String),
    #[error("menu group `{0}` has no children")]
    EmptyGroup(String),
    #[error("menu entry `{0}` has an empty label")]
    EmptyLabel(String),
    #[error("menu entry `{key}` has invalid route `{route}` (must start with `/`)")]
    InvalidRoute { key: String, route: String },
}

// =============================================================================
// MENU
// =============================================================================

/// A validated navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavMenu {
    roots: Vec<NavNode>,
}

impl NavMenu {
    /// Validate and wrap a tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`MenuError`] found in depth-first order.
    pub fn new(roots: Vec<NavNode>) -> Result<Self, MenuError> {
        if roots.is_empty() {
            return Err(MenuError::Empty);
        }
        let mut keys = HashSet::new();
        let mut routes = HashSet::new();
        for node in &roots {
            validate(node, &mut keys, &mut routes)?;
        }
        Ok(Self { roots })
    }

    /// The application menu.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in tree itself is malformed.
    pub fn standard() -> Result<Self, MenuError> {
        use Icon::*;
        use NavNode as N;

        Self::new(vec![
            N::leaf("dashboard", "Dashboard", "/dashboard", Home),
            N::group("product", "PRODUIT", Shop, vec![
                N::leaf("productCategory", "Catégorie de produit", "/product-category", UnorderedList),
                N::leaf("products", "Produits", "/product", UnorderedList),
            ]),
            N::group("purchaseSection", "APPROVISIONNEMENT", PlusSquare, vec![
                N::leaf("suppliers", "Fournisseurs", "/supplier", User),
                N::leaf("newPurchase", "Nouvel Approvisionnement", "/purchase", Check),
                N::leaf("purchaseList", "Liste des Approvisionnements", "/purchaselist", UnorderedList),
            ]),
            N::group("saleSection", "SPA", MinusSquare, vec![
                N::leaf("customers", "Clientèle", "/customer", User),
                N::leaf("newSale", "Nouvelle vente", "/sale", Check),
                N::leaf("saleList", "Liste de vente", "/salelist", UnorderedList),
            ]),
            N::group("accountSection", "COMPTES", Inbox, vec![
                N::leaf("accountList", "Compte", "/account/", UnorderedList),
                N::leaf("newTransaction", "Nouvelle transaction", "/transaction/create", Check),
                N::leaf("transactionList", "Liste des transactions", "/transaction/", UnorderedList),
            ]),
            N::group("reportSection", "RAPPORT", Fund, vec![
                N::leaf("trialBalance", "Balance de vérification", "/account/trial-balance", FileDone),
                N::leaf("balanceSheet", "Bilan", "/account/balance-sheet", File),
                N::leaf("incomeStatement", "État des résultats", "/account/income", FileSync),
            ]),
            N::group("hrSection", "HR", User, vec![
                N::leaf("staffs", "Personnel", "/hr/staffs", UsergroupAdd),
                N::leaf("roleAndPermissions", "Rôle et autorisations", "/role", UserSwitch),
                N::leaf("designation", "Designation", "/designation/", UserSwitch),
            ]),
            N::leaf("pos", "BOUTIQUE", "/pos", ShoppingCart),
            N::group("settings", "PARAMÈTRES", Setting, vec![
                N::leaf("invoiceSetting", "Paramètres de facturation", "/invoice-setting", Setting),
            ]),
        ])
    }

    #[must_use]
    pub fn roots(&self) -> &[NavNode] {
        &self.roots
    }

    /// Every leaf in display (depth-first) order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&NavLeaf> {
        let mut out = Vec::new();
        for node in &self.roots {
            collect_leaves(node, &mut out);
        }
        out
    }

    /// Node with `key`, at any depth.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&NavNode> {
        self.roots.iter().find_map(|node| find_in(node, key))
    }

    /// Leaf routed to `route`. Trailing slashes are not significant.
    #[must_use]
    pub fn leaf_for_route(&self, route: &str) -> Option<&NavLeaf> {
        let wanted = normalize_route(route);
        self.leaves()
            .into_iter()
            .find(|leaf| normalize_route(leaf.route) == wanted)
    }

    /// Labels from the root down to the node with `key`.
    #[must_use]
    pub fn trail(&self, key: &str) -> Option<Vec<&'static str>> {
        self.roots.iter().find_map(|node| {
            let mut path = Vec::new();
            trail_in(node, key, &mut path).then_some(path)
        })
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn validate(
    node: &NavNode,
    keys: &mut HashSet<&'static str>,
    routes: &mut HashSet<String>,
) -> Result<(), MenuError> {
    let key = node.key();
    if !keys.insert(key) {
        return Err(MenuError::DuplicateKey(key.to_owned()));
    }
    if node.label().trim().is_empty() {
        return Err(MenuError::EmptyLabel(key.to_owned()));
    }
    match node {
        NavNode::Leaf(leaf) => {
            if !leaf.route.starts_with('/') {
                return Err(MenuError::InvalidRoute { key: key.to_owned(), route: leaf.route.to_owned() });
            }
            if !routes.insert(normalize_route(leaf.route).to_owned()) {
                return Err(MenuError::DuplicateRoute(leaf.route.to_owned()));
            }
        }
        NavNode::Group(group) => {
            if group.children.is_empty() {
                return Err(MenuError::EmptyGroup(key.to_owned()));
            }
            for child in &group.children {
                validate(child, keys, routes)?;
            }
        }
    }
    Ok(())
}

fn normalize_route(route: &str) -> &str {
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn collect_leaves<'a>(node: &'a NavNode, out: &mut Vec<&'a NavLeaf>) {
    match node {
        NavNode::Leaf(leaf) => out.push(leaf),
        NavNode::Group(group) => {
            for child in &group.children {
                collect_leaves(child, out);
            }
        }
    }
}

fn find_in<'a>(node: &'a NavNode, key: &str) -> Option<&'a NavNode> {
    if node.key() == key {
        return Some(node);
    }
    match node {
        NavNode::Leaf(_) => None,
        NavNode::Group(group) => group.children.iter().find_map(|child| find_in(child, key)),
    }
}

fn trail_in(node: &NavNode, key: &str, path: &mut Vec<&'static str>) -> bool {
    path.push(node.label());
    if node.key() == key {
        return true;
    }
    if let NavNode::Group(group) = node {
        for child in &group.children {
            if trail_in(child, key, path) {
                return true;
            }
        }
    }
    path.pop();
    false
}
