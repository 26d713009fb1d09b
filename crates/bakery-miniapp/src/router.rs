//! Path-based routing.
use crate::model::{CategoryId, ProductId};
use std::fmt::Display;

/// Every screen the app can show, addressed by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/about`
    About,
    /// `/catalog`
    Catalog,
    /// `/catalog/{categoryId}`
    Category(CategoryId),
    /// `/product/{productId}`
    Product(ProductId),
    /// `/message-admin`
    MessageAdmin,
    /// `/order/{productId}`
    Order(ProductId),
    /// `/admin/broadcast`
    Broadcast,
}

impl Route {
    /// Resolves a path; anything unknown lands on [`Route::Home`].
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["catalog"] => Route::Catalog,
            ["catalog", id] => Route::Category(CategoryId::from(*id)),
            ["product", id] => Route::Product(ProductId::from(*id)),
            ["message-admin"] => Route::MessageAdmin,
            ["order", id] => Route::Order(ProductId::from(*id)),
            ["admin", "broadcast"] => Route::Broadcast,
            _ => Route::Home,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Catalog => "/catalog".to_string(),
            Route::Category(id) => format!("/catalog/{}", urlencoding::encode(&id.0)),
            Route::Product(id) => format!("/product/{}", urlencoding::encode(&id.0)),
            Route::MessageAdmin => "/message-admin".to_string(),
            Route::Order(id) => format!("/order/{}", urlencoding::encode(&id.0)),
            Route::Broadcast => "/admin/broadcast".to_string(),
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Broadcast)
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(Route::parse("/catalog/"), Route::Catalog);
        assert_eq!(
            Route::parse("/catalog/c1"),
            Route::Category(CategoryId::from("c1"))
        );
        assert_eq!(
            Route::parse("/product/p1?ref=search"),
            Route::Product(ProductId::from("p1"))
        );
        assert_eq!(
            Route::parse("/order/p1"),
            Route::Order(ProductId::from("p1"))
        );
        assert_eq!(Route::parse("/message-admin"), Route::MessageAdmin);
        assert_eq!(Route::parse("/admin/broadcast"), Route::Broadcast);
    }

    #[test]
    fn test_unknown_paths_go_home() {
        assert_eq!(Route::parse("/admin"), Route::Home);
        assert_eq!(Route::parse("/catalog/c1/extra"), Route::Home);
        assert_eq!(Route::parse("nonsense"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
    }

    #[test]
    fn test_path_round_trips_ids_with_spaces() {
        let route = Route::Product(ProductId::from("honey cake"));
        assert_eq!(route.path(), "/product/honey%20cake");
        assert_eq!(Route::parse(&route.path()), route);
    }

    #[test]
    fn test_only_broadcast_requires_admin() {
        assert!(Route::Broadcast.requires_admin());
        assert!(!Route::MessageAdmin.requires_admin());
    }
}
