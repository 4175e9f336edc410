//! Build step capabilities
//!
//! Fragments attach under `<builders>`.

use crate::entry::Entry;
use crate::registry::RegistryGroup;
use crate::schema::{ParamSpec, ParameterSchema, Params};
use crate::xml::Element;

pub(crate) fn group() -> RegistryGroup {
    RegistryGroup::new()
        .container("builders")
        .entry(
            "shell_command",
            Entry::single(
                "shell_command",
                ParameterSchema::new()
                    .scalar_alias("command")
                    .param(ParamSpec::text("command").required()),
                shell_command,
            ),
        )
        .entry(
            "maven3",
            Entry::single(
                "maven3",
                ParameterSchema::new()
                    .param(ParamSpec::text("goals").required())
                    .param(ParamSpec::text("root_pom").with_default("pom.xml"))
                    .param(ParamSpec::text("maven_name").with_default("tools-maven-3"))
                    .param(ParamSpec::text("maven_opts").with_default("")),
                maven3,
            ),
        )
        .entry(
            "inject_vars_file",
            Entry::single(
                "inject_vars_file",
                ParameterSchema::new()
                    .scalar_alias("file")
                    .param(ParamSpec::text("file").required()),
                inject_vars_file,
            ),
        )
}

fn shell_command(params: &Params) -> Element {
    Element::new("hudson.tasks.Shell").with_text_child("command", &params.text("command"))
}

fn maven3(params: &Params) -> Element {
    Element::new("org.jfrog.hudson.maven3.Maven3Builder")
        .with_text_child("mavenName", &params.text("maven_name"))
        .with_text_child("rootPom", &params.text("root_pom"))
        .with_text_child("goals", &params.text("goals"))
        .with_text_child("mavenOpts", &params.text("maven_opts"))
}

fn inject_vars_file(params: &Params) -> Element {
    Element::new("org.jenkinsci.plugins.envinject.EnvInjectBuilder").with_child(
        Element::new("info").with_text_child("propertiesFilePath", &params.text("file")),
    )
}
