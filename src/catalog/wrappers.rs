//! Build wrapper capabilities
//!
//! Fragments attach under `<buildWrappers>`. Element names are the wire
//! identifiers of the backing Jenkins plugins (dots in plugin package names,
//! double underscores where Jenkins escapes an underscore).

use crate::entry::Entry;
use crate::registry::RegistryGroup;
use crate::schema::{ParamSpec, ParameterSchema, Params};
use crate::value::ConfigNode;
use crate::version::VersionBand;
use crate::xml::Element;

pub(crate) fn group() -> RegistryGroup {
    RegistryGroup::new()
        .container("buildWrappers")
        .entry(
            "ansicolor",
            Entry::single("ansicolor", ParameterSchema::new().allow_bare_bool(), ansicolor),
        )
        .entry(
            "timestamp",
            Entry::single("timestamp", ParameterSchema::new().allow_bare_bool(), timestamp),
        )
        .entry(
            "timeout",
            // The build-timeout plugin switched from flat fields to strategy
            // classes in 1.14.
            Entry::new("timeout")
                .band(
                    VersionBand::between(super::v("0.0"), super::v("1.14")),
                    timeout_schema(),
                    timeout_flat,
                )
                .band(
                    VersionBand::from(super::v("1.14")),
                    timeout_schema(),
                    timeout_strategy,
                ),
        )
        .entry(
            "xvfb",
            Entry::single(
                "xvfb",
                ParameterSchema::new()
                    .allow_bare_bool()
                    .param(ParamSpec::text("installation_name").with_default("default"))
                    .param(ParamSpec::text("screen").with_default("1024x768x24"))
                    .param(ParamSpec::integer("timeout").with_default(0))
                    .param(ParamSpec::integer("display_name_offset").with_default(1)),
                xvfb,
            ),
        )
        .entry(
            "rvm",
            // The rvm plugin moved the ruby version into an <impl> child
            // in 0.5; earlier releases store it as element text.
            Entry::new("rvm")
                .band(
                    VersionBand::between(super::v("0.0"), super::v("0.5")),
                    rvm_schema(),
                    rvm_inline,
                )
                .band(VersionBand::from(super::v("0.5")), rvm_schema(), rvm_impl),
        )
        .entry(
            "inject_env_var",
            Entry::single(
                "inject_env_var",
                ParameterSchema::new()
                    .param(ParamSpec::text("file"))
                    .param(ParamSpec::text("content")),
                inject_env_var,
            ),
        )
        .entry(
            "inject_passwords",
            Entry::single(
                "inject_passwords",
                ParameterSchema::new()
                    .sequence_alias("passwords")
                    .param(ParamSpec::sequence("passwords").with_default(ConfigNode::Sequence(vec![])))
                    .param(ParamSpec::boolean("inject_global_passwords").with_default(false)),
                inject_passwords,
            ),
        )
        .entry(
            "nodejs",
            Entry::single(
                "nodejs",
                ParameterSchema::new().param(ParamSpec::text("node_installation_name").required()),
                nodejs,
            ),
        )
        .entry(
            "prebuild_cleanup",
            Entry::single(
                "prebuild_cleanup",
                ParameterSchema::new().allow_bare_bool(),
                prebuild_cleanup,
            ),
        )
}

fn timeout_schema() -> ParameterSchema {
    ParameterSchema::new()
        .allow_bare_bool()
        .param(ParamSpec::integer("timeout").with_default(3))
        .param(ParamSpec::boolean("fail").with_default(false))
}

fn ansicolor(_: &Params) -> Element {
    Element::new("hudson.plugins.ansicolor.AnsiColorBuildWrapper").with_text_child("colorMapName", "xterm")
}

fn timestamp(_: &Params) -> Element {
    Element::new("hudson.plugins.timestamper.TimestamperBuildWrapper")
}

fn timeout_flat(params: &Params) -> Element {
    Element::new("hudson.plugins.build__timeout.BuildTimeoutWrapper")
        .with_text_child("timeoutMinutes", &params.text("timeout"))
        .with_text_child("failBuild", &params.flag("fail").to_string())
}

fn timeout_strategy(params: &Params) -> Element {
    let strategy = Element::new("strategy")
        .with_attribute(
            "class",
            "hudson.plugins.build_timeout.impl.AbsoluteTimeOutStrategy",
        )
        .with_text_child("timeoutMinutes", &params.text("timeout"));
    let mut operations = Element::new("operationList");
    if params.flag("fail") {
        operations.push_child(Element::new(
            "hudson.plugins.build__timeout.operations.FailOperation",
        ));
    }
    Element::new("hudson.plugins.build__timeout.BuildTimeoutWrapper")
        .with_child(strategy)
        .with_child(operations)
}

fn xvfb(params: &Params) -> Element {
    Element::new("org.jenkinsci.plugins.xvfb.XvfbBuildWrapper")
        .with_text_child("installationName", &params.text("installation_name"))
        .with_text_child("screen", &params.text("screen"))
        .with_text_child("timeout", &params.text("timeout"))
        .with_text_child("displayNameOffset", &params.text("display_name_offset"))
}

fn rvm_schema() -> ParameterSchema {
    ParameterSchema::new()
        .scalar_alias("ruby_version")
        .param(ParamSpec::text("ruby_version").required())
}

fn rvm_inline(params: &Params) -> Element {
    Element::new("hudson.plugins.rvm.RvmBuildWrapper").with_text(&params.text("ruby_version"))
}

fn rvm_impl(params: &Params) -> Element {
    Element::new("hudson.plugins.rvm.RvmBuildWrapper")
        .with_text_child("impl", &params.text("ruby_version"))
}

fn inject_env_var(params: &Params) -> Element {
    let mut info = Element::new("info");
    if params.contains("file") {
        info = info.with_text_child("propertiesFilePath", &params.text("file"));
    }
    if params.contains("content") {
        info = info.with_text_child("propertiesContent", &params.text("content"));
    }
    info = info.with_text_child("loadFilesFromMaster", "false");
    Element::new("EnvInjectBuildWrapper").with_child(info)
}

fn inject_passwords(params: &Params) -> Element {
    let mut entries = Element::new("passwordEntries");
    for item in params.sequence("passwords") {
        let name = item.get("name").and_then(|n| n.scalar_text()).unwrap_or_default();
        let value = item.get("value").and_then(|n| n.scalar_text()).unwrap_or_default();
        entries.push_child(
            Element::new("EnvInjectPasswordEntry")
                .with_text_child("name", &name)
                .with_text_child("value", &value),
        );
    }
    Element::new("EnvInjectPasswordWrapper")
        .with_text_child(
            "injectGlobalPasswords",
            &params.flag("inject_global_passwords").to_string(),
        )
        .with_child(entries)
}

fn nodejs(params: &Params) -> Element {
    Element::new("jenkins.plugins.nodejs.tools.NpmPackagesBuildWrapper")
        .with_text_child("nodeJSInstallationName", &params.text("node_installation_name"))
}

fn prebuild_cleanup(_: &Params) -> Element {
    Element::new("hudson.plugins.ws__cleanup.PreBuildCleanup")
        .with_text_child("deleteDirs", "false")
        .with_text_child("cleanupParameter", "")
        .with_text_child("externalDelete", "")
}
