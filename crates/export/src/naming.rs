use crate::job::{ExportRequest, ExportScope};
use carta_menu::VenueBranding;

/// Deterministic artifact file name for a job: a pure function of venue
/// identity and the request, so re-running an export overwrites its own
/// previous output instead of scattering copies.
pub fn artifact_name(branding: &VenueBranding, request: &ExportRequest) -> String {
    if let Some(adjustment) = request.adjustment {
        return format!(
            "{}-promo-{}pct.pdf",
            branding.slug,
            percent_token(adjustment.percent)
        );
    }
    match request.scope {
        ExportScope::AllPages => format!("{}-menu.pdf", branding.slug),
        ExportScope::CurrentPage(index) => {
            format!("{}-menu-page-{}.pdf", branding.slug, index + 1)
        }
    }
}

/// File-name-safe rendering of a signed percentage: "10", "12-5",
/// "minus20".
fn percent_token(percent: f64) -> String {
    let sign = if percent < 0.0 { "minus" } else { "" };
    let magnitude = percent.abs();
    if magnitude.fract() == 0.0 {
        format!("{}{}", sign, magnitude as i64)
    } else {
        format!("{}{}", sign, magnitude).replace('.', "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_menu_name() {
        let branding = VenueBranding::new("Bay Leaf", None, None);
        let name = artifact_name(&branding, &ExportRequest::all_pages());
        assert_eq!(name, "bay-leaf-menu.pdf");
    }

    #[test]
    fn test_single_page_name_is_one_based() {
        let branding = VenueBranding::new("Bay Leaf", None, None);
        let name = artifact_name(&branding, &ExportRequest::current_page(0));
        assert_eq!(name, "bay-leaf-menu-page-1.pdf");
    }

    #[test]
    fn test_promotional_name_carries_percentage() {
        let branding = VenueBranding::new("Bay Leaf", None, None);
        assert_eq!(
            artifact_name(&branding, &ExportRequest::promotional(10.0)),
            "bay-leaf-promo-10pct.pdf"
        );
        assert_eq!(
            artifact_name(&branding, &ExportRequest::promotional(-20.0)),
            "bay-leaf-promo-minus20pct.pdf"
        );
        assert_eq!(
            artifact_name(&branding, &ExportRequest::promotional(12.5)),
            "bay-leaf-promo-12-5pct.pdf"
        );
    }
}
