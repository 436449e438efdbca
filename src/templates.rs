//! Template Registry
//!
//! Built-in site templates: section order plus styling hints that steer the
//! Art Director. Unknown names fall back to the generic landing template.

use sitesmith_pipeline::TemplateSpec;

fn spec(name: &str, sections: &[&str], style_hints: &str) -> TemplateSpec {
    TemplateSpec {
        name: name.to_string(),
        sections: sections.iter().map(|s| s.to_string()).collect(),
        style_hints: style_hints.to_string(),
    }
}

pub fn template_names() -> Vec<&'static str> {
    vec![
        "saas",
        "restaurant",
        "portfolio",
        "ecommerce",
        "agency",
        "landing",
    ]
}

/// Look up a template by name; `None` for unknown names.
pub fn template(name: &str) -> Option<TemplateSpec> {
    match name {
        "saas" => Some(spec(
            "saas",
            &[
                "hero", "logos", "features", "how-it-works", "pricing", "testimonials", "faq",
                "cta", "footer",
            ],
            "Modern tech aesthetic, bold gradients, product screenshots, clear pricing tiers",
        )),
        "restaurant" => Some(spec(
            "restaurant",
            &[
                "hero", "menu-highlights", "about", "gallery", "testimonials", "hours-location",
                "reservation-cta", "footer",
            ],
            "Warm and appetizing, large food photography, elegant serif headings",
        )),
        "portfolio" => Some(spec(
            "portfolio",
            &["hero", "selected-work", "about", "skills", "testimonials", "contact", "footer"],
            "Minimal and confident, generous whitespace, strong typography, work-first layout",
        )),
        "ecommerce" => Some(spec(
            "ecommerce",
            &[
                "hero", "featured-products", "benefits", "social-proof", "collections", "faq",
                "newsletter", "footer",
            ],
            "Clean product-forward design, trust badges, prominent add-to-cart styling",
        )),
        "agency" => Some(spec(
            "agency",
            &[
                "hero", "services", "case-studies", "process", "team", "testimonials", "cta",
                "footer",
            ],
            "Bold and editorial, oversized headings, asymmetric layouts, confident color",
        )),
        "landing" => Some(spec(
            "landing",
            &["hero", "features", "testimonials", "faq", "cta", "footer"],
            "Clean, conversion-focused, generous whitespace",
        )),
        _ => None,
    }
}

/// Template by name, falling back to `landing`.
pub fn template_or_default(name: &str) -> TemplateSpec {
    template(name).unwrap_or_else(TemplateSpec::default)
}
