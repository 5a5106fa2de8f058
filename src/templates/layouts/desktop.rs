use crate::seo::PageMetadata;
use maud::{html, Markup, PreEscaped, DOCTYPE};

// `</` inside a JSON-LD string would close the script element early.
fn json_ld(value: &serde_json::Value) -> PreEscaped<String> {
    PreEscaped(value.to_string().replace("</", "<\\/"))
}

pub fn desktop_layout(meta: &PageMetadata, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (meta.title) }
                meta name="description" content=(meta.description);
                @if !meta.keywords.is_empty() {
                    meta name="keywords" content=(meta.keywords);
                }
                meta name="robots" content=(meta.robots());
                @if let Some(canonical) = &meta.canonical {
                    link rel="canonical" href=(canonical);
                }

                meta property="og:title" content=(meta.og_title);
                meta property="og:description" content=(meta.og_description);
                meta property="og:type" content="website";
                meta property="og:site_name" content=(meta.site_name);
                @if let Some(url) = &meta.og_url {
                    meta property="og:url" content=(url);
                }
                @for image in &meta.og_images {
                    meta property="og:image" content=(image.url);
                    meta property="og:image:width" content=(image.width);
                    meta property="og:image:height" content=(image.height);
                    meta property="og:image:alt" content=(image.alt);
                }

                meta name="twitter:card" content="summary_large_image";
                meta name="twitter:title" content=(meta.og_title);
                meta name="twitter:description" content=(meta.twitter_description);
                @if let Some(image) = meta.og_images.first() {
                    meta name="twitter:image" content=(image.url);
                }

                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";

                @if let Some(data) = &meta.structured_data {
                    script type="application/ld+json" { (json_ld(data)) }
                }
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    a href="/used-cars" class="logo" { (meta.site_name) }
                    nav {
                        ul {
                            li { a href="/used-cars" { "Used" } }
                            li { a href="/used-cars?featured=true" { "Featured" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
