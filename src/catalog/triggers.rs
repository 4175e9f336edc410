//! Build trigger capabilities
//!
//! Fragments attach under `<triggers>`.

use crate::entry::Entry;
use crate::registry::RegistryGroup;
use crate::schema::{ParamSpec, ParameterSchema, Params};
use crate::xml::Element;

pub(crate) fn group() -> RegistryGroup {
    RegistryGroup::new()
        .container("triggers")
        .entry(
            "git_push",
            Entry::single("git_push", ParameterSchema::new().allow_bare_bool(), git_push),
        )
        .entry(
            "scm_polling",
            Entry::single(
                "scm_polling",
                ParameterSchema::new()
                    .scalar_alias("schedule")
                    .param(ParamSpec::text("schedule").required()),
                scm_polling,
            ),
        )
        .entry(
            "periodic_build",
            Entry::single(
                "periodic_build",
                ParameterSchema::new()
                    .scalar_alias("schedule")
                    .param(ParamSpec::text("schedule").required()),
                periodic_build,
            ),
        )
        .entry(
            "upstream",
            Entry::single(
                "upstream",
                ParameterSchema::new()
                    .param(ParamSpec::text("projects").required())
                    .param(ParamSpec::text("status").with_default("SUCCESS")),
                upstream,
            ),
        )
}

fn git_push(_: &Params) -> Element {
    Element::new("com.cloudbees.jenkins.GitHubPushTrigger").with_child(Element::new("spec"))
}

fn scm_polling(params: &Params) -> Element {
    Element::new("hudson.triggers.SCMTrigger").with_text_child("spec", &params.text("schedule"))
}

fn periodic_build(params: &Params) -> Element {
    Element::new("hudson.triggers.TimerTrigger").with_text_child("spec", &params.text("schedule"))
}

fn upstream(params: &Params) -> Element {
    // Jenkins encodes the result threshold as a (name, ordinal, color)
    // triple; anything unrecognized falls back to SUCCESS.
    let (name, ordinal, color) = match params.text("status").to_uppercase().as_str() {
        "UNSTABLE" => ("UNSTABLE", "1", "YELLOW"),
        "FAILURE" => ("FAILURE", "2", "RED"),
        _ => ("SUCCESS", "0", "BLUE"),
    };
    Element::new("jenkins.triggers.ReverseBuildTrigger")
        .with_child(Element::new("spec"))
        .with_text_child("upstreamProjects", &params.text("projects"))
        .with_child(
            Element::new("threshold")
                .with_text_child("name", name)
                .with_text_child("ordinal", ordinal)
                .with_text_child("color", color),
        )
}
