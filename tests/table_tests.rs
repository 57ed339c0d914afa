use route_template::config::LinkConfig;
use route_template::RouteTable;
use std::io::Write;
use tempfile::NamedTempFile;

const ROUTES_YAML: &str = r#"
base_url: https://shop.example.com/
routes:
  product: /api/Product/{id:number}?{name?:string}&{all:boolean}
  product_by_tenant: /api/{tenant}/Product
  reviews: /api/Product/{id:number}/reviews?{page?:number}
"#;

fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_yaml_table() {
    let file = write_temp(ROUTES_YAML, ".yaml");
    let table = RouteTable::from_file(file.path()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        ["product", "product_by_tenant", "reviews"]
    );
    assert_eq!(table.base_url(), Some("https://shop.example.com/"));
    assert_eq!(
        table.url_for("product", [("id", "5"), ("all", "false")]).unwrap(),
        "https://shop.example.com/api/Product/5?all=false"
    );
}

#[test]
fn test_load_json_table() {
    let file = write_temp(r#"{"routes": {"user": "/users/{id}"}}"#, ".json");
    let table = RouteTable::from_file(file.path()).unwrap();
    assert_eq!(table.url_for("user", [("id", 1)]).unwrap(), "/users/1");
}

#[test]
fn test_groups_by_structural_key() {
    let file = write_temp(ROUTES_YAML, ".yml");
    let table = RouteTable::from_file(file.path()).unwrap();
    let groups = table.groups();

    assert_eq!(groups["/api/Product"], ["product", "product_by_tenant"]);
    assert_eq!(groups["/api/Product/reviews"], ["reviews"]);
}

#[test]
fn test_unknown_route_name() {
    let table = RouteTable::new([("home", "/")]).unwrap();
    let err = table.url_for("missing", [("id", 1)]).unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn test_invalid_template_fails_load() {
    let file = write_temp("routes:\n  broken: /a//b\n", ".yaml");
    let err = RouteTable::from_file(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("broken"));
}

#[test]
fn test_link_config_overrides_base_url() {
    let file = write_temp(ROUTES_YAML, ".yaml");
    let path = file.path().to_string_lossy().to_string();
    let config = LinkConfig::from_values(Some("http://localhost:8080"), Some(&path));

    let table = config.load_route_table().unwrap().unwrap();
    assert_eq!(
        table.url_for("reviews", [("id", 3)]).unwrap(),
        "http://localhost:8080/api/Product/3/reviews"
    );
}
