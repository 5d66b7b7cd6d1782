use maud::{html, Markup, DOCTYPE};

use crate::services::Outcome;

pub fn base_layout(title: &str, flash: Option<&Outcome>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" class="h-full" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Stagebook" }

                link rel="stylesheet" href="/static/css/main.css";

                // HTMX for the delete buttons
                script src="https://unpkg.com/htmx.org@1.9.10" {}
            }
            body class="h-full bg-gray-50" {
                div class="min-h-full" {
                    // Navigation
                    (nav_bar())

                    // Main content
                    main class="container mx-auto px-4 py-8" {
                        @if let Some(outcome) = flash {
                            (flash_banner(outcome))
                        }
                        (content)
                    }

                    // Footer
                    (footer())
                }
            }
        }
    }
}

fn flash_banner(outcome: &Outcome) -> Markup {
    let class = if outcome.success {
        "flash flash-success"
    } else {
        "flash flash-error"
    };

    html! {
        div class=(class) role="alert" {
            (outcome.message)
        }
    }
}

fn nav_bar() -> Markup {
    html! {
        nav class="navbar" {
            div class="container mx-auto px-4" {
                div class="flex justify-between items-center h-16" {
                    a href="/" class="brand" {
                        "Stagebook"
                    }

                    div class="nav-links" {
                        a href="/venues" { "Venues" }
                        a href="/artists" { "Artists" }
                        a href="/shows" { "Shows" }
                    }

                    div class="nav-search" {
                        form method="post" action="/venues/search" {
                            input type="search" name="search_term" placeholder="Find a venue";
                        }
                        form method="post" action="/artists/search" {
                            input type="search" name="search_term" placeholder="Find an artist";
                        }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="footer" {
            div class="container mx-auto px-4 py-6" {
                "Stagebook - venues, artists and the shows between them"
            }
        }
    }
}
