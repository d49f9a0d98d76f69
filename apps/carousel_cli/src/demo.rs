//! Built-in showcase used when no items file is configured.

use anyhow::Result;
use carousel::navigation::SocialLink;
use shared::domain::Item;
use url::Url;

pub fn showcase_items() -> Vec<Item> {
    vec![
        Item::new(1, "Night of Info 2024 challenge")
            .with_description(
                "Interactive educational web app drawing parallels between the human body \
                 and the ocean.",
            )
            .with_tools("React, Tailwind CSS, Framer Motion, node.js")
            .with_demo_link("https://example.org/ocean")
            .with_image("projects/info.png"),
        Item::new(2, "Employee turnover study")
            .with_description(
                "Predictive models over HR, survey and badge data to find the drivers of a \
                 15% yearly turnover.",
            )
            .with_tools("Python, Scikit-learn, pandas, matplotlib")
            .with_demo_link("#")
            .with_image("projects/ia.png"),
        Item::new(4, "Bike sharing analysis")
            .with_description(
                "Cleaning and dashboarding of a self-service bike fleet's usage data with \
                 utilisation and rotation KPIs.",
            )
            .with_tools("Python, Power BI, matplotlib, seaborn")
            .with_image("projects/velo.png"),
    ]
}

pub fn social_links() -> Result<Vec<SocialLink>> {
    [
        ("github", "https://github.com/example"),
        ("linkedin", "https://www.linkedin.com/in/example"),
        ("mail", "mailto:someone@example.org"),
    ]
    .into_iter()
    .map(|(label, url)| {
        Ok(SocialLink {
            label: label.to_string(),
            url: Url::parse(url)?,
        })
    })
    .collect()
}
