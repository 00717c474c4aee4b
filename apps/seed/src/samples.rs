//! Sample posts.

use blogsite_core::{DomainError, PostInput, PostService};

struct Sample {
    title: &'static str,
    excerpt: &'static str,
    image: &'static str,
    content: &'static str,
}

const SAMPLES: [Sample; 3] = [
    Sample {
        title: "Getting Started with Flask",
        excerpt: "A beginner's guide to Flask, a lightweight web framework for Python.",
        image: "https://example.com/images/flask.jpg",
        content: r#"# Getting Started with Flask

Flask is a lightweight web framework for Python, designed to make getting started quick and easy.

## Installing Flask

```bash
pip install flask
```

## Hello World

```python
from flask import Flask
app = Flask(__name__)

@app.route('/')
def hello_world():
    return 'Hello, World!'
```
"#,
    },
    Sample {
        title: "Introduction to NextJS",
        excerpt: "Learn about NextJS, a powerful React framework for building modern web applications.",
        image: "https://example.com/images/nextjs.jpg",
        content: r#"# Introduction to NextJS

Next.js is a React framework with server-side rendering, static site generation and API routes.

## Getting Started

```bash
npx create-next-app@latest my-app
```
"#,
    },
    Sample {
        title: "Working with PostgreSQL",
        excerpt: "An introduction to PostgreSQL, a powerful open-source relational database system.",
        image: "https://example.com/images/postgresql.jpg",
        content: r#"# Working with PostgreSQL

PostgreSQL is an open-source relational database with full ACID compliance and strong JSON support.

## Basic Commands

```sql
CREATE DATABASE mydb;
CREATE TABLE users (id SERIAL PRIMARY KEY, name VARCHAR(100) NOT NULL);
SELECT * FROM users;
```
"#,
    },
];

/// Payloads for every sample post.
pub fn sample_posts() -> Vec<PostInput> {
    SAMPLES
        .iter()
        .map(|s| {
            PostInput::new(s.title, s.content)
                .with_excerpt(s.excerpt)
                .with_featured_image(s.image)
                .with_published(true)
        })
        .collect()
}

/// Insert every sample, returning how many were written.
pub async fn seed(service: &PostService) -> Result<usize, DomainError> {
    let mut inserted = 0;
    for input in sample_posts() {
        let post = service.create(input).await?;
        tracing::info!(post_id = post.id, title = %post.title, "Seeded post");
        inserted += 1;
    }
    Ok(inserted)
}
