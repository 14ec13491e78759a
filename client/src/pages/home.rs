//! Landing page with quick links to every tool.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

/// Quick-link cards as `(path, label, description)`.
pub const QUICK_LINKS: [(&str, &str, &str); 7] = [
    ("/fresh-load", "Fresh Load Test", "Perform initial load testing for new models"),
    ("/analysis-verification", "Analysis Validation", "Validate model analysis results"),
    ("/regression-load", "Regression Load Test", "Run comparative regression tests"),
    ("/urlmodel-test", "URL Model Test", "Test models with URL inputs"),
    ("/file-upload", "Image Model Test", "Test models with image uploads"),
    ("/generate-image", "Generate Image Url", "Host an image and copy its URL"),
    ("/task", "Collector Task", "Submit a data collection task"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <div class="home-page__intro">
                <h2>"Welcome to Utility Tools"</h2>
                <p>"Select a tool to get started"</p>
            </div>
            <div class="home-page__grid">
                {QUICK_LINKS
                    .iter()
                    .map(|(path, label, description)| {
                        view! {
                            <a class="home-card" href=*path>
                                <span class="home-card__title">{*label}</span>
                                <span class="home-card__description">{*description}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
