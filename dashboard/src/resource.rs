//! Resource registry: the typed configuration table behind every CRUD
//! screen.
//!
//! DESIGN
//! ======
//! Each backend resource is described once by a [`ResourceSpec`]: endpoint,
//! route, table columns, create-form fields and the localized messages shown
//! after a submit. [`Registry::new`] validates the whole table at startup so
//! a typo in a column key fails fast instead of at render time.

use std::collections::HashSet;

use crate::columns::{ColumnDescriptor, Render, SortKind};
use crate::form::FieldSpec;
use crate::menu::NavMenu;

#[cfg(test)]
#[path = "resource_test.rs"]
mod tests;

// =============================================================================
// TYPES
// =============================================================================

/// Localized notice texts for a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Success notice after a record was created.
    pub created: &'static str,
    /// Error notice after the backend rejected a create or was unreachable.
    pub create_failed: &'static str,
    /// Warning notice when client-side validation stops a submit.
    pub invalid: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    /// Registry key, e.g. `customer`.
    pub name: &'static str,
    /// Endpoint relative to the API base URL, e.g. `customer/`.
    pub path: &'static str,
    /// Front-end route of the list screen, matching a menu leaf.
    pub route: &'static str,
    /// Heading of the list table.
    pub list_title: &'static str,
    /// Heading of the create form.
    pub form_title: &'static str,
    /// Base name of the CSV export.
    pub export_filename: &'static str,
    pub columns: Vec<ColumnDescriptor>,
    pub fields: Vec<FieldSpec>,
    pub messages: Messages,
}

/// A configuration mistake found by [`Registry::new`] or
/// [`Registry::check_routes`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate resource `{0}`")]
    DuplicateResource(String),
    #[error("resource `{resource}`: path `{path}` must be relative and end with `/`")]
    InvalidPath { resource: String, path: String },
    #[error("resource `{0}` declares no columns")]
    NoColumns(String),
    #[error("resource `{resource}`: duplicate column `{column}`")]
    DuplicateColumn { resource: String, column: String },
    #[error("resource `{resource}`: link column `{column}` has no `{{id}}` placeholder")]
    LinkWithoutPlaceholder { resource: String, column: String },
    #[error("resource `{0}` declares no form fields")]
    NoFields(String),
    #[error("resource `{resource}`: duplicate form field `{field}`")]
    DuplicateField { resource: String, field: String },
    #[error("resource `{resource}`: required field `{field}` has no message")]
    MissingRequiredMessage { resource: String, field: String },
    #[error("resource `{resource}`: route `{route}` is not in the navigation menu")]
    UnroutedResource { resource: String, route: String },
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Validated set of resource specs, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    resources: Vec<ResourceSpec>,
}

impl Registry {
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] found.
    pub fn new(resources: Vec<ResourceSpec>) -> Result<Self, RegistryError> {
        let mut names = HashSet::new();
        for spec in &resources {
            if !names.insert(spec.name) {
                return Err(RegistryError::DuplicateResource(spec.name.to_owned()));
            }
            validate_spec(spec)?;
        }
        Ok(Self { resources })
    }

    /// The resources managed by the application.
    ///
    /// # Errors
    ///
    /// Only fails if the built-in table itself is malformed.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::new(vec![customer(), supplier(), product_category(), role(), designation()])
    }

    /// Check that every resource route has a menu leaf.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnroutedResource`] for the first resource
    /// the menu cannot reach.
    pub fn check_routes(&self, menu: &NavMenu) -> Result<(), RegistryError> {
        for spec in &self.resources {
            if menu.leaf_for_route(spec.route).is_none() {
                return Err(RegistryError::UnroutedResource {
                    resource: spec.name.to_owned(),
                    route: spec.route.to_owned(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResourceSpec> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Resource whose list screen lives at `route`.
    #[must_use]
    pub fn for_route(&self, route: &str) -> Option<&ResourceSpec> {
        let wanted = route.trim_end_matches('/');
        self.resources
            .iter()
            .find(|r| r.route.trim_end_matches('/') == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceSpec> {
        self.resources.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.resources.iter().map(|r| r.name).collect()
    }
}

fn validate_spec(spec: &ResourceSpec) -> Result<(), RegistryError> {
    let resource = || spec.name.to_owned();

    if spec.path.is_empty() || spec.path.starts_with('/') || !spec.path.ends_with('/') {
        return Err(RegistryError::InvalidPath { resource: resource(), path: spec.path.to_owned() });
    }

    if spec.columns.is_empty() {
        return Err(RegistryError::NoColumns(resource()));
    }
    let mut keys = HashSet::new();
    for column in &spec.columns {
        if !keys.insert(column.key) {
            return Err(RegistryError::DuplicateColumn { resource: resource(), column: column.key.to_owned() });
        }
        if let Render::Link { template } = column.render {
            if !template.contains("{id}") {
                return Err(RegistryError::LinkWithoutPlaceholder {
                    resource: resource(),
                    column: column.key.to_owned(),
                });
            }
        }
    }

    if spec.fields.is_empty() {
        return Err(RegistryError::NoFields(resource()));
    }
    let mut fields = HashSet::new();
    for field in &spec.fields {
        if !fields.insert(field.name) {
            return Err(RegistryError::DuplicateField { resource: resource(), field: field.name.to_owned() });
        }
        if field.required && field.required_message.trim().is_empty() {
            return Err(RegistryError::MissingRequiredMessage {
                resource: resource(),
                field: field.name.to_owned(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// BUILT-IN RESOURCES
// =============================================================================

fn id_column() -> ColumnDescriptor {
    ColumnDescriptor::new("id", "ID").sort(SortKind::Numeric)
}

fn name_column() -> ColumnDescriptor {
    ColumnDescriptor::new("name", "Nom").sort(SortKind::Text)
}

fn created_at_column() -> ColumnDescriptor {
    ColumnDescriptor::new("createdAt", "Créé le")
        .sort(SortKind::Chronological)
        .render(Render::Date)
}

fn action_column(template: &'static str) -> ColumnDescriptor {
    ColumnDescriptor::new("action", "Action")
        .field("id")
        .render(Render::Link { template })
}

fn customer() -> ResourceSpec {
    ResourceSpec {
        name: "customer",
        path: "customer/",
        route: "/customer",
        list_title: "Liste des clients",
        form_title: "Ajouter un nouveau client",
        export_filename: "customers",
        columns: vec![
            id_column(),
            name_column(),
            ColumnDescriptor::new("phone", "Téléphone").sort(SortKind::Text),
            ColumnDescriptor::new("address", "Adresse").sort(SortKind::Text),
            created_at_column(),
            action_column("/customer/{id}"),
        ],
        fields: vec![
            FieldSpec::required("name", "Nom", "Veuillez entrer le nom du client!"),
            FieldSpec::required("phone", "Téléphone", "Veuillez entrer le numéro de téléphone!"),
            FieldSpec::optional("address", "Adresse"),
        ],
        messages: Messages {
            created: "Client ajouté",
            create_failed: "Erreur lors l'ajout d'un client, essayez à nouveau",
            invalid: "Échec de l'ajout d'un client",
        },
    }
}

fn supplier() -> ResourceSpec {
    ResourceSpec {
        name: "supplier",
        path: "supplier/",
        route: "/supplier",
        list_title: "Liste des fournisseurs",
        form_title: "Ajouter un nouveau fournisseur",
        export_filename: "suppliers",
        columns: vec![
            id_column(),
            name_column(),
            ColumnDescriptor::new("phone", "Téléphone").sort(SortKind::Text),
            ColumnDescriptor::new("address", "Adresse").sort(SortKind::Text),
            created_at_column(),
            action_column("/supplier/{id}"),
        ],
        fields: vec![
            FieldSpec::required("name", "Nom", "Veuillez entrer le nom du fournisseur!"),
            FieldSpec::required("phone", "Téléphone", "Veuillez entrer le numéro de téléphone!"),
            FieldSpec::optional("address", "Adresse"),
        ],
        messages: Messages {
            created: "Fournisseur ajouté",
            create_failed: "Erreur lors l'ajout d'un fournisseur, essayez à nouveau",
            invalid: "Échec de l'ajout d'un fournisseur",
        },
    }
}

fn product_category() -> ResourceSpec {
    ResourceSpec {
        name: "product-category",
        path: "product-category/",
        route: "/product-category",
        list_title: "Liste des catégories de produits",
        form_title: "Ajouter une nouvelle catégorie",
        export_filename: "product-categories",
        columns: vec![
            id_column(),
            name_column(),
            created_at_column(),
            action_column("/product-category/{id}"),
        ],
        fields: vec![FieldSpec::required("name", "Nom", "Veuillez entrer le nom de la catégorie!")],
        messages: Messages {
            created: "Catégorie de produit ajoutée",
            create_failed: "Erreur lors l'ajout d'une catégorie, essayez à nouveau",
            invalid: "Échec de l'ajout d'une catégorie de produit",
        },
    }
}

fn role() -> ResourceSpec {
    ResourceSpec {
        name: "role",
        path: "role/",
        route: "/role",
        list_title: "Liste des rôles",
        form_title: "Ajouter un nouveau rôle",
        export_filename: "roles",
        columns: vec![id_column(), name_column(), created_at_column(), action_column("/role/{id}/")],
        fields: vec![FieldSpec::required("name", "Nom", "Veuillez entrer votre nom d’utilisateur!")],
        messages: Messages {
            created: "Rôle ajouté",
            create_failed: "Erreur lors l'ajout d'un rôle, essayez à nouveau",
            invalid: "Échec de l'ajout d'un rôle",
        },
    }
}

fn designation() -> ResourceSpec {
    ResourceSpec {
        name: "designation",
        path: "designation/",
        route: "/designation/",
        list_title: "Liste des désignations",
        form_title: "Ajouter une nouvelle désignation",
        export_filename: "designations",
        columns: vec![
            id_column(),
            name_column(),
            created_at_column(),
            action_column("/designation/{id}"),
        ],
        fields: vec![FieldSpec::required("name", "Nom", "Veuillez entrer la désignation!")],
        messages: Messages {
            created: "Désignation ajoutée",
            create_failed: "Erreur lors l'ajout d'une désignation, essayez à nouveau",
            invalid: "Échec de l'ajout d'une désignation",
        },
    }
}
