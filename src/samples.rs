//! Canned articles for demos: one clickbait piece, one credible report, one conspiracy post.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleArticle {
    pub name: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

pub const SAMPLES: [SampleArticle; 3] = [
    SampleArticle {
        name: "Clickbait",
        title: "BREAKING: Miracle Cure Discovered – Big Pharma Panicking!",
        content: "A revolutionary natural cure heals everything in days! Doctors hate this trick. \
                  Click now before it's banned!",
    },
    SampleArticle {
        name: "Credible",
        title: "New mRNA Cancer Therapy Shows Strong Early Results",
        content: "According to Reuters and Nature Medicine, a phase II trial of a novel \
                  mRNA-based therapy demonstrated promising tumor reduction in 62% of \
                  participants...",
    },
    SampleArticle {
        name: "Conspiracy",
        title: "GOVERNMENT CONFIRMS ALIENS – SHOCKING AREA 51 FOOTAGE!!!",
        content: "Leaked documents PROVE aliens are real! You won't believe what they found!!! \
                  Watch before they delete this video!!!",
    },
];

/// Sample by 1-based number.
pub fn sample(number: usize) -> Option<&'static SampleArticle> {
    number.checked_sub(1).and_then(|i| SAMPLES.get(i))
}
