use fave_core::{init_tracing, LogConfig, LogFormat};

#[test]
fn init_tracing_only_installs_once() {
    let config = LogConfig {
        filter: "fave=debug".into(),
        format: LogFormat::Json,
    };
    assert!(init_tracing(&config));
    assert!(!init_tracing(&LogConfig::default()));
}
