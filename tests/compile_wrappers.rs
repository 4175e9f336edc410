//! Wrapper compilation scenarios against the built-in catalog

use jobforge::{catalog, compile, CompileError, ConfigNode, Document};

/// Compile a YAML job definition with the given installed versions and
/// return the serialized XML.
fn compile_yaml(installs: &[(&str, &str)], yaml: &str) -> String {
    try_compile_yaml(installs, yaml).unwrap()
}

fn try_compile_yaml(installs: &[(&str, &str)], yaml: &str) -> Result<String, CompileError> {
    let mut registry = catalog::default_registry();
    for (path, version) in installs {
        registry.install_version(path, version).unwrap();
    }
    let config: ConfigNode = serde_yaml::from_str(yaml).unwrap();
    let mut doc = Document::new("project");
    compile(&registry, "job", &config, &mut doc)?;
    Ok(doc.to_xml())
}

fn find<'a>(doc: &'a roxmltree::Document<'a>, name: &str) -> Option<roxmltree::Node<'a, 'a>> {
    doc.descendants().find(|n| n.has_tag_name(name))
}

#[test]
fn ansicolor_generates_correct_xml() {
    let xml = compile_yaml(
        &[("job.wrappers.ansicolor", "0.0")],
        "wrappers:\n  ansicolor: true\n",
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let node = find(&doc, "hudson.plugins.ansicolor.AnsiColorBuildWrapper").unwrap();
    assert_eq!(node.parent_element().unwrap().tag_name().name(), "buildWrappers");
    let color = find(&doc, "colorMapName").unwrap();
    assert_eq!(color.text(), Some("xterm"));
}

#[test]
fn ansicolor_rejects_parameters() {
    let err = try_compile_yaml(
        &[("job.wrappers.ansicolor", "0.0")],
        "wrappers:\n  ansicolor:\n    config: false\n",
    )
    .unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownParameter {
            capability: "ansicolor".to_string(),
            name: "config".to_string(),
        }
    );
}

#[test]
fn timestamp_generates_correct_xml() {
    let xml = compile_yaml(
        &[("job.wrappers.timestamp", "0.0")],
        "wrappers:\n  timestamp: true\n",
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    assert!(find(&doc, "hudson.plugins.timestamper.TimestamperBuildWrapper").is_some());
}

#[test]
fn xvfb_accepts_empty_mapping() {
    let xml = compile_yaml(&[("job.wrappers.xvfb", "0.0")], "wrappers:\n  xvfb: {}\n");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    assert!(find(&doc, "org.jenkinsci.plugins.xvfb.XvfbBuildWrapper").is_some());
    assert_eq!(find(&doc, "screen").unwrap().text(), Some("1024x768x24"));
}

#[test]
fn inject_passwords_legacy_sequence() {
    let xml = compile_yaml(
        &[("job.wrappers.inject_passwords", "0.0")],
        "wrappers:\n  inject_passwords:\n    - name: x\n      value: y\n",
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let entry = find(&doc, "EnvInjectPasswordEntry").unwrap();
    let name = entry
        .children()
        .find(|n| n.has_tag_name("name"))
        .unwrap();
    assert_eq!(name.text(), Some("x"));
}

#[test]
fn inject_passwords_canonical_mapping_matches_legacy() {
    let legacy = compile_yaml(
        &[("job.wrappers.inject_passwords", "0.0")],
        "wrappers:\n  inject_passwords:\n    - name: x\n      value: y\n",
    );
    let canonical = compile_yaml(
        &[("job.wrappers.inject_passwords", "0.0")],
        "wrappers:\n  inject_passwords:\n    passwords:\n      - name: x\n        value: y\n",
    );
    assert_eq!(legacy, canonical);
}

#[test]
fn inject_passwords_global_flag() {
    let xml = compile_yaml(
        &[("job.wrappers.inject_passwords", "0.0")],
        "wrappers:\n  inject_passwords:\n    inject_global_passwords: true\n",
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    assert_eq!(
        find(&doc, "injectGlobalPasswords").unwrap().text(),
        Some("true")
    );
}

#[test]
fn nodejs_generates_installation_name() {
    let xml = compile_yaml(
        &[("job.wrappers.nodejs", "0.0")],
        "wrappers:\n  nodejs:\n    node_installation_name: Node-0.10.24\n",
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let wrapper = find(&doc, "jenkins.plugins.nodejs.tools.NpmPackagesBuildWrapper").unwrap();
    let name = wrapper
        .children()
        .find(|n| n.has_tag_name("nodeJSInstallationName"))
        .unwrap();
    assert_eq!(name.text(), Some("Node-0.10.24"));
}

#[test]
fn nodejs_requires_installation_name() {
    let err = try_compile_yaml(&[("job.wrappers.nodejs", "0.0")], "wrappers:\n  nodejs: {}\n")
        .unwrap_err();
    assert_eq!(
        err,
        CompileError::MissingParameter {
            capability: "nodejs".to_string(),
            name: "node_installation_name".to_string(),
        }
    );
}

#[test]
fn prebuild_cleanup_generates_correct_xml() {
    let xml = compile_yaml(
        &[("job.wrappers.prebuild_cleanup", "0.0")],
        "wrappers:\n  prebuild_cleanup: true\n",
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    assert!(find(&doc, "hudson.plugins.ws__cleanup.PreBuildCleanup").is_some());
}

#[test]
fn rvm_accepts_bare_scalar() {
    let xml = compile_yaml(
        &[("job.wrappers.rvm", "0.5")],
        "wrappers:\n  rvm: ruby-2.1.1\n",
    );
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let wrapper = find(&doc, "hudson.plugins.rvm.RvmBuildWrapper").unwrap();
    let imp = wrapper.children().find(|n| n.has_tag_name("impl")).unwrap();
    assert_eq!(imp.text(), Some("ruby-2.1.1"));
}

#[test]
fn rvm_selects_band_by_installed_version() {
    let old = compile_yaml(
        &[("job.wrappers.rvm", "0.2")],
        "wrappers:\n  rvm: ruby-2.1.1\n",
    );
    let old_doc = roxmltree::Document::parse(&old).unwrap();
    let wrapper = find(&old_doc, "hudson.plugins.rvm.RvmBuildWrapper").unwrap();
    assert!(wrapper.children().all(|n| !n.has_tag_name("impl")));
    assert_eq!(wrapper.text(), Some("ruby-2.1.1"));

    let new = compile_yaml(
        &[("job.wrappers.rvm", "0.6")],
        "wrappers:\n  rvm: ruby-2.1.1\n",
    );
    let new_doc = roxmltree::Document::parse(&new).unwrap();
    let wrapper = find(&new_doc, "hudson.plugins.rvm.RvmBuildWrapper").unwrap();
    let imp = wrapper.children().find(|n| n.has_tag_name("impl")).unwrap();
    assert_eq!(imp.text(), Some("ruby-2.1.1"));
}

#[test]
fn timeout_selects_band_by_installed_version() {
    let old = compile_yaml(
        &[("job.wrappers.timeout", "1.2")],
        "wrappers:\n  timeout:\n    timeout: 10\n",
    );
    let old_doc = roxmltree::Document::parse(&old).unwrap();
    assert!(find(&old_doc, "timeoutMinutes").is_some());
    assert!(find(&old_doc, "strategy").is_none());

    let new = compile_yaml(
        &[("job.wrappers.timeout", "1.20")],
        "wrappers:\n  timeout:\n    timeout: 10\n",
    );
    let new_doc = roxmltree::Document::parse(&new).unwrap();
    let strategy = find(&new_doc, "strategy").unwrap();
    assert_eq!(
        strategy.attribute("class"),
        Some("hudson.plugins.build_timeout.impl.AbsoluteTimeOutStrategy")
    );
}
