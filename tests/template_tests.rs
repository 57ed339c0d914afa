use route_template::{ParamType, RouteTemplate, TemplateError};

fn descriptor_summary(template: &RouteTemplate) -> Vec<(String, ParamType, bool, bool, usize)> {
    template
        .parameters()
        .iter()
        .map(|p| {
            (
                p.key().to_string(),
                p.value_type(),
                p.is_query_parameter(),
                p.is_optional(),
                p.order(),
            )
        })
        .collect()
}

#[test]
fn test_compilation_is_deterministic() {
    let templates = [
        "/api/Product/{id:number}?{name?:string}&{all:boolean}",
        "/users/{userId}/posts/{postId:number}",
        "/search?{q:string}&{page?:number}&{exact?:boolean}",
        "/",
    ];
    for template in templates {
        let a = RouteTemplate::parse(template).unwrap();
        let b = RouteTemplate::parse(template).unwrap();
        assert_eq!(descriptor_summary(&a), descriptor_summary(&b));
        assert_eq!(a.match_pattern(), b.match_pattern());
        assert_eq!(a.structural_key(), b.structural_key());
    }
}

#[test]
fn test_product_template_compiles() {
    let t = RouteTemplate::parse("/api/Product/{id:number}?{name?:string}&{all:boolean}").unwrap();
    assert_eq!(
        descriptor_summary(&t),
        vec![
            ("id".to_string(), ParamType::Number, false, false, 1),
            ("name".to_string(), ParamType::String, true, true, 2),
            ("all".to_string(), ParamType::Boolean, true, false, 3),
        ]
    );
    assert_eq!(t.match_pattern(), "/api/Product/:id");
    assert_eq!(t.path_segments(), ["/", "api", "Product"]);
    assert_eq!(t.structural_key(), "/api/Product");
}

#[test]
fn test_case_insensitive_duplicate_rejected() {
    let err = RouteTemplate::parse("/items/{a}{A}").unwrap_err();
    assert!(matches!(err, TemplateError::DuplicateParameter { .. }));
    assert!(err.to_string().contains("Duplicate route params"));
}

#[test]
fn test_bare_optional_path_parameter_rejected() {
    let err = RouteTemplate::parse("{id?:number}").unwrap_err();
    assert!(matches!(err, TemplateError::OptionalPathParameter { .. }));
}

#[test]
fn test_unbalanced_braces_rejected() {
    let err = RouteTemplate::parse("/x/{id").unwrap_err();
    assert_eq!(err, TemplateError::UnbalancedBraces);
    assert_eq!(err.to_string(), "Invalid route template. Braces do not match.");
}

#[test]
fn test_unknown_type_is_any() {
    let t = RouteTemplate::parse("/x/{id:uuid}").unwrap();
    assert_eq!(t.parameters()[0].value_type(), ParamType::Any);
}

#[test]
fn test_serializes_to_json() {
    let t = RouteTemplate::parse("/x/{id:number}?{q?}").unwrap();
    let json = serde_json::to_value(&t).unwrap();
    assert_eq!(json["raw_template"], "/x/{id:number}?{q?}");
    assert_eq!(json["structural_key"], "/x");
    assert_eq!(json["has_query_section"], true);
    assert_eq!(json["parameters"][1]["key"], "q");
    assert_eq!(json["parameters"][1]["value_type"], "any");
    assert_eq!(json["parameters"][1]["is_optional"], true);
    assert!(json.get("parameter_index").is_none());
}

#[test]
fn test_shared_across_threads() {
    let t = std::sync::Arc::new(RouteTemplate::parse("/users/{id:number}").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let t = std::sync::Arc::clone(&t);
            std::thread::spawn(move || t.generate_url([("id", i)]))
        })
        .collect();
    let mut urls: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    urls.sort();
    assert_eq!(urls, ["/users/0", "/users/1", "/users/2", "/users/3"]);
}
