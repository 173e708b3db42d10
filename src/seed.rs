//! The catalog a fresh portfolio starts with.

use crate::project::Project;

struct Entry {
    name: &'static str,
    description: &'static str,
    url: &'static str,
    github_url: &'static str,
    category: &'static str,
    language: &'static str,
    stars: u32,
    is_featured: bool,
}

const CATALOG: [Entry; 6] = [
    Entry {
        name: "Retrofit",
        description: "A type-safe HTTP client for Android and Java.",
        url: "https://square.github.io/retrofit/",
        github_url: "https://github.com/square/retrofit",
        category: "Android",
        language: "Java",
        stars: 42000,
        is_featured: true,
    },
    Entry {
        name: "OkHttp",
        description: "Square's meticulous HTTP client for the JVM, Android, \
                      and GraalVM.",
        url: "https://square.github.io/okhttp/",
        github_url: "https://github.com/square/okhttp",
        category: "Android",
        language: "Kotlin",
        stars: 45000,
        is_featured: true,
    },
    Entry {
        name: "LeakCanary",
        description: "A memory leak detection library for Android.",
        url: "https://square.github.io/leakcanary/",
        github_url: "https://github.com/square/leakcanary",
        category: "Android",
        language: "Kotlin",
        stars: 29000,
        is_featured: false,
    },
    Entry {
        name: "Picasso",
        description: "A powerful image downloading and caching library for \
                      Android.",
        url: "https://square.github.io/picasso/",
        github_url: "https://github.com/square/picasso",
        category: "Android",
        language: "Java",
        stars: 18000,
        is_featured: false,
    },
    Entry {
        name: "Moshi",
        description: "A modern JSON library for Android, Java and Kotlin.",
        url: "https://github.com/square/moshi",
        github_url: "https://github.com/square/moshi",
        category: "Java",
        language: "Kotlin",
        stars: 10000,
        is_featured: false,
    },
    Entry {
        name: "Wire",
        description: "gRPC and protocol buffers for Android, Kotlin, and Java.",
        url: "https://github.com/square/wire",
        github_url: "https://github.com/square/wire",
        category: "Kotlin",
        language: "Kotlin",
        stars: 4000,
        is_featured: false,
    },
];

/// Default projects, with ids starting at 1.
pub fn default_catalog() -> Vec<Project> {
    CATALOG
        .iter()
        .zip(1..)
        .map(|(entry, id)| Project {
            id,
            name: entry.name.to_owned(),
            description: entry.description.to_owned(),
            url: Some(entry.url.to_owned()),
            github_url: Some(entry.github_url.to_owned()),
            category: entry.category.to_owned(),
            language: Some(entry.language.to_owned()),
            stars: entry.stars,
            is_featured: entry.is_featured,
        })
        .collect()
}
