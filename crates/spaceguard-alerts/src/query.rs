//! Read-only queries over the alert context.

use crate::messages;
use crate::types::{AlertContext, AlertKind, SpaceAlertConfig};

/// Returns every space with at least one enabled alert passing the filters.
///
/// A kind only counts when it has a threshold (if `require_threshold`) and
/// matches `kind` (if given). Spaces come back in context order.
#[must_use]
pub fn spaces_with_enabled_alerts<'a>(
    ctx: &'a AlertContext,
    require_threshold: bool,
    kind: Option<AlertKind>,
) -> Vec<&'a SpaceAlertConfig> {
    ctx.space_config
        .values()
        .filter(|config| {
            config.alerts.iter().any(|(k, setting)| {
                if require_threshold && setting.threshold.is_none() {
                    return false;
                }
                if kind.is_some_and(|want| want != k) {
                    return false;
                }
                setting.enabled
            })
        })
        .collect()
}

/// Renders the listing of all spaces with any enabled alert.
///
/// One line per qualifying space: the space header followed by
/// ` <kind>[:<threshold>%]` entries for each enabled kind, comma separated.
/// No qualifying space at all yields the single "no alerts" message.
#[must_use]
pub fn list_alerts(ctx: Option<&AlertContext>) -> String {
    let Some(ctx) = ctx else {
        return messages::list_off();
    };

    let mut out = String::new();
    for config in spaces_with_enabled_alerts(ctx, false, None) {
        let mut line = messages::list_enabled(&config.name);
        for (kind, setting) in config.alerts.iter() {
            if !setting.enabled {
                continue;
            }
            line.push_str(&format!(" {kind}"));
            if let Some(threshold) = setting.threshold {
                line.push_str(&format!(":{threshold}%"));
            }
            line.push(',');
        }
        if line.ends_with(',') {
            line.pop();
        }
        line.push('\n');
        out.push_str(&line);
    }

    if out.is_empty() {
        messages::list_off()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AlertTarget, Space};

    fn ctx_with_space(guid: &str, name: &str, shape: impl FnOnce(&mut SpaceAlertConfig)) -> AlertContext {
        let mut ctx = AlertContext::default();
        shape(ctx.space_entry(&Space::new(guid, name)));
        ctx
    }

    #[test]
    fn absent_context_lists_nothing() {
        assert_eq!(list_alerts(None), messages::list_off());
    }

    #[test]
    fn empty_context_lists_nothing() {
        let ctx = AlertContext::default();
        assert_eq!(list_alerts(Some(&ctx)), messages::list_off());
    }

    #[test]
    fn space_with_only_disabled_alerts_is_skipped() {
        let ctx = ctx_with_space("g1", "dev", |_| {});
        assert_eq!(list_alerts(Some(&ctx)), messages::list_off());
    }

    #[test]
    fn enabled_kinds_render_in_order_with_thresholds() {
        let ctx = ctx_with_space("g1", "testSpace", |config| {
            config.enable_all();
            config.alerts.cpu.threshold = Some(50);
            config.alerts.memory.threshold = Some(90);
        });

        let expected = format!(
            "{} cpu:50%, memory:90%, disk:85%, crash\n",
            messages::list_enabled("testSpace")
        );
        assert_eq!(list_alerts(Some(&ctx)), expected);
    }

    #[test]
    fn multiple_spaces_render_one_line_each() {
        let mut ctx = ctx_with_space("a-guid", "alpha", |config| {
            config.alerts.cpu.enabled = true;
        });
        ctx.space_entry(&Space::new("b-guid", "beta")).alerts.crash.enabled = true;

        let listing = list_alerts(Some(&ctx));
        let expected = format!(
            "{} cpu:85%\n{} crash\n",
            messages::list_enabled("alpha"),
            messages::list_enabled("beta")
        );
        assert_eq!(listing, expected);
    }

    #[test]
    fn threshold_filter_excludes_crash_only_spaces() {
        let ctx = ctx_with_space("g1", "dev", |config| {
            config.alerts.crash.enabled = true;
        });

        assert_eq!(spaces_with_enabled_alerts(&ctx, false, None).len(), 1);
        assert!(spaces_with_enabled_alerts(&ctx, true, None).is_empty());
    }

    #[test]
    fn kind_filter_matches_only_that_kind() {
        let ctx = ctx_with_space("g1", "dev", |config| {
            config.alerts.set_enabled(AlertTarget::Kind(crate::types::AlertKind::Disk), true);
        });

        assert_eq!(
            spaces_with_enabled_alerts(&ctx, false, Some(AlertKind::Disk)).len(),
            1
        );
        assert!(spaces_with_enabled_alerts(&ctx, false, Some(AlertKind::Cpu)).is_empty());
    }
}
