//! Post-build publisher capabilities
//!
//! Fragments attach under `<publishers>`.

use crate::entry::Entry;
use crate::registry::RegistryGroup;
use crate::schema::{ParamSpec, ParameterSchema, Params};
use crate::xml::Element;

pub(crate) fn group() -> RegistryGroup {
    RegistryGroup::new()
        .container("publishers")
        .entry(
            "junit_result",
            Entry::single(
                "junit_result",
                ParameterSchema::new()
                    .param(ParamSpec::text("test_results").with_default(""))
                    .param(ParamSpec::boolean("keep_long_stdio").with_default(false)),
                junit_result,
            ),
        )
        .entry(
            "archive_artifact",
            Entry::single(
                "archive_artifact",
                ParameterSchema::new()
                    .param(ParamSpec::text("artifacts").required())
                    .param(ParamSpec::text("exclude"))
                    .param(ParamSpec::boolean("latest_only").with_default(false)),
                archive_artifact,
            ),
        )
        .entry(
            "description_setter",
            Entry::single(
                "description_setter",
                ParameterSchema::new()
                    .param(ParamSpec::text("regexp").with_default(""))
                    .param(ParamSpec::text("description").with_default("")),
                description_setter,
            ),
        )
        .entry(
            "email_notifications",
            Entry::single(
                "email_notifications",
                ParameterSchema::new()
                    .param(ParamSpec::text("recipients").required())
                    .param(ParamSpec::boolean("send_if_unstable").with_default(true))
                    .param(ParamSpec::boolean("send_to_individuals").with_default(false)),
                email_notifications,
            ),
        )
}

fn junit_result(params: &Params) -> Element {
    Element::new("hudson.tasks.junit.JUnitResultArchiver")
        .with_text_child("testResults", &params.text("test_results"))
        .with_text_child("keepLongStdio", &params.flag("keep_long_stdio").to_string())
        .with_child(Element::new("testDataPublishers"))
}

fn archive_artifact(params: &Params) -> Element {
    let mut el = Element::new("hudson.tasks.ArtifactArchiver")
        .with_text_child("artifacts", &params.text("artifacts"));
    if params.contains("exclude") {
        el = el.with_text_child("excludes", &params.text("exclude"));
    }
    el.with_text_child("latestOnly", &params.flag("latest_only").to_string())
}

fn description_setter(params: &Params) -> Element {
    Element::new("hudson.plugins.descriptionsetter.DescriptionSetterPublisher")
        .with_text_child("regexp", &params.text("regexp"))
        .with_text_child("regexpForFailed", "")
        .with_text_child("description", &params.text("description"))
        .with_text_child("setForMatrix", "false")
}

fn email_notifications(params: &Params) -> Element {
    // Jenkins stores the inverse: dontNotifyEveryUnstableBuild
    let dont_notify = !params.flag("send_if_unstable");
    Element::new("hudson.tasks.Mailer")
        .with_text_child("recipients", &params.text("recipients"))
        .with_text_child("dontNotifyEveryUnstableBuild", &dont_notify.to_string())
        .with_text_child(
            "sendToIndividuals",
            &params.flag("send_to_individuals").to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Validated;
    use crate::value::mapping;

    fn validated(schema: &ParameterSchema, capability: &str, input: &crate::value::ConfigNode) -> Params {
        match schema.validate(capability, input).unwrap() {
            Validated::Params(params) => params,
            Validated::Disabled => panic!("unexpected disable"),
        }
    }

    #[test]
    fn test_email_notifications_inverts_unstable_flag() {
        let schema = ParameterSchema::new()
            .param(ParamSpec::text("recipients").required())
            .param(ParamSpec::boolean("send_if_unstable").with_default(true))
            .param(ParamSpec::boolean("send_to_individuals").with_default(false));

        let params = validated(
            &schema,
            "email_notifications",
            &mapping([("recipients", "dev@example.com".into())]),
        );
        let el = email_notifications(&params);
        assert_eq!(
            el.find_child("dontNotifyEveryUnstableBuild").unwrap().text(),
            "false"
        );

        let params = validated(
            &schema,
            "email_notifications",
            &mapping([
                ("recipients", "dev@example.com".into()),
                ("send_if_unstable", false.into()),
            ]),
        );
        let el = email_notifications(&params);
        assert_eq!(
            el.find_child("dontNotifyEveryUnstableBuild").unwrap().text(),
            "true"
        );
    }

    #[test]
    fn test_junit_result_fragment() {
        let schema = ParameterSchema::new()
            .param(ParamSpec::text("test_results").with_default(""))
            .param(ParamSpec::boolean("keep_long_stdio").with_default(false));
        let params = validated(
            &schema,
            "junit_result",
            &mapping([("test_results", "reports/**/*.xml".into())]),
        );
        let el = junit_result(&params);
        assert_eq!(el.name(), "hudson.tasks.junit.JUnitResultArchiver");
        assert_eq!(el.find_child("testResults").unwrap().text(), "reports/**/*.xml");
        assert_eq!(el.find_child("keepLongStdio").unwrap().text(), "false");
        assert!(el.find_child("testDataPublishers").is_some());
    }

    #[test]
    fn test_description_setter_fragment() {
        let schema = ParameterSchema::new()
            .param(ParamSpec::text("regexp").with_default(""))
            .param(ParamSpec::text("description").with_default(""));
        let params = validated(
            &schema,
            "description_setter",
            &mapping([
                ("regexp", "deployed to (.*)".into()),
                ("description", "Deployed to \\1".into()),
            ]),
        );
        let el = description_setter(&params);
        assert_eq!(
            el.name(),
            "hudson.plugins.descriptionsetter.DescriptionSetterPublisher"
        );
        assert_eq!(el.find_child("regexp").unwrap().text(), "deployed to (.*)");
        assert_eq!(el.find_child("description").unwrap().text(), "Deployed to \\1");
        assert_eq!(el.find_child("setForMatrix").unwrap().text(), "false");
    }

    #[test]
    fn test_archive_artifact_optional_exclude() {
        let schema = ParameterSchema::new()
            .param(ParamSpec::text("artifacts").required())
            .param(ParamSpec::text("exclude"))
            .param(ParamSpec::boolean("latest_only").with_default(false));

        let params = validated(
            &schema,
            "archive_artifact",
            &mapping([("artifacts", "target/*.jar".into())]),
        );
        let el = archive_artifact(&params);
        assert!(el.find_child("excludes").is_none());
        assert_eq!(el.find_child("latestOnly").unwrap().text(), "false");
    }
}
