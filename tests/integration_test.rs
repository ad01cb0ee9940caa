use polygon_plugins::{Config, LoaderError, PolygonPlugins, RegistryPluginStatus};
use std::path::PathBuf;
use tempfile::TempDir;

fn config_without_discovery() -> Config {
    let mut config = Config::default();
    config.plugins.enable_external_discovery = false;
    config
}

#[tokio::test]
async fn test_builtin_classes_by_lookup_name() {
    let app = PolygonPlugins::new(config_without_discovery()).unwrap();
    app.initialize_plugins().await.unwrap();

    let triangle = app
        .create_polygon("polygon_plugins/Triangle", 10.0)
        .await
        .unwrap();
    let square = app
        .create_polygon("polygon_plugins/Square", 10.0)
        .await
        .unwrap();

    assert!((triangle.area().unwrap() - 43.30127018922193).abs() < 1e-9);
    assert_eq!(square.area().unwrap(), 100.0);
}

#[tokio::test]
async fn test_builtin_classes_by_class_type() {
    let app = PolygonPlugins::new(config_without_discovery()).unwrap();
    app.initialize_plugins().await.unwrap();

    let manager = app.plugin_manager();
    assert!(manager.is_class_available("polygon_plugins::Triangle").await);
    assert!(manager.is_class_available("polygon_plugins::Square").await);
    assert_eq!(
        manager.declared_classes().await,
        vec!["polygon_plugins/Square", "polygon_plugins/Triangle"]
    );

    let metadata = manager
        .class_metadata("polygon_plugins/Triangle")
        .await
        .unwrap();
    assert_eq!(metadata.class_type, "polygon_plugins::Triangle");
    assert_eq!(metadata.base_class_type, "polygon_base::RegularPolygon");
    assert_eq!(metadata.description, "This is a triangle plugin.");
}

#[tokio::test]
async fn test_uninitialized_instance() {
    let app = PolygonPlugins::new(config_without_discovery()).unwrap();
    app.initialize_plugins().await.unwrap();

    let square = app
        .plugin_manager()
        .create_instance("polygon_plugins/Square")
        .await
        .unwrap();
    assert!(square.area().is_err());
    assert!(app.plugin_manager().is_class_loaded("polygon_plugins/Square").await);

    drop(square);
    assert!(!app.plugin_manager().is_class_loaded("polygon_plugins/Square").await);
}

#[tokio::test]
async fn test_unknown_class() {
    let app = PolygonPlugins::new(config_without_discovery()).unwrap();
    app.initialize_plugins().await.unwrap();

    let err = app
        .plugin_manager()
        .create_instance("polygon_plugins/Circle")
        .await
        .unwrap_err();
    assert!(matches!(err, LoaderError::UnknownClass(_)));
    assert!(app.create_polygon("polygon_plugins/Circle", 1.0).await.is_err());
}

#[tokio::test]
async fn test_run_demo() {
    let mut config = config_without_discovery();
    config.demo.side_length = 2.0;
    config.demo.classes = vec![
        "polygon_plugins/Square".to_string(),
        "polygon_plugins::Triangle".to_string(),
    ];

    let app = PolygonPlugins::new(config).unwrap();
    app.initialize_plugins().await.unwrap();

    let results = app.run_demo().await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].area, 4.0);
    assert!((results[1].area - 1.7320508075688772).abs() < 1e-9);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let mut config = Config::default();
    config.version = "0.9".to_string();
    assert!(PolygonPlugins::new(config).is_err());
}

#[tokio::test]
async fn test_missing_plugin_directories() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.plugins.plugin_directories = vec![
        temp_dir.path().join("does-not-exist"),
        PathBuf::from("~/polygon-plugins-test-missing"),
    ];

    let app = PolygonPlugins::new(config).unwrap();
    let summary = app.initialize_plugins().await.unwrap();
    assert_eq!(summary.errors, 0);

    let plugins = app.get_plugin_info().await.unwrap();
    assert_eq!(plugins.len(), 2);
    assert!(plugins
        .iter()
        .all(|entry| entry.status == RegistryPluginStatus::Loaded));
}

#[tokio::test]
async fn test_reinitializing_keeps_live_instances() {
    let app = PolygonPlugins::new(config_without_discovery()).unwrap();
    app.initialize_plugins().await.unwrap();

    let square = app
        .create_polygon("polygon_plugins/Square", 3.0)
        .await
        .unwrap();
    assert_eq!(
        app.plugin_manager()
            .instance_count("polygon_plugins/Square")
            .await,
        1
    );

    app.initialize_plugins().await.unwrap();
    assert_eq!(
        app.plugin_manager()
            .instance_count("polygon_plugins/Square")
            .await,
        1
    );
    assert_eq!(square.area().unwrap(), 9.0);
}
