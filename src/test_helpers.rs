//! Shared test utilities: record builders and fixture setup.
//!
//! Builders fill every field a test does not care about with a predictable
//! value, so tests only spell out what they assert on:
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut p = post("1", "tech", "2024-01-01");
//! p.views = 40;
//! let store = store_with(vec![p], vec![author("ada", "Ada")], vec![category("tech", "Tech")]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{
    Author, Category, Collection, ContentStore, Department, Faq, Job, Post, Project, Testimonial,
};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Record builders
// =========================================================================

/// A post by author `ada`, titled `Post {id}`, slug `post-{id}`.
pub fn post(id: &str, category_id: &str, publish_date: &str) -> Post {
    Post {
        id: id.to_string(),
        slug: format!("post-{id}"),
        title: format!("Post {id}"),
        excerpt: String::new(),
        content: String::new(),
        author_id: "ada".to_string(),
        category_id: category_id.to_string(),
        publish_date: publish_date.to_string(),
        read_time: 4,
        views: 0,
        likes: 0,
        featured: false,
        tags: Vec::new(),
        image: String::new(),
    }
}

/// An author whose avatar is `/img/{id}.jpg`.
pub fn author(id: &str, name: &str) -> Author {
    Author {
        id: id.to_string(),
        name: name.to_string(),
        avatar: format!("/img/{id}.jpg"),
        role: String::new(),
        bio: String::new(),
    }
}

pub fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: id.to_string(),
        description: String::new(),
    }
}

pub fn department(id: &str, name: &str) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
    }
}

pub fn job(id: &str, department_id: &str, posted_date: &str) -> Job {
    Job {
        id: id.to_string(),
        slug: format!("job-{id}"),
        title: format!("Job {id}"),
        department_id: department_id.to_string(),
        location: "Remote".to_string(),
        employment_type: "full-time".to_string(),
        posted_date: posted_date.to_string(),
        salary: String::new(),
        featured: false,
        summary: String::new(),
        responsibilities: Vec::new(),
        requirements: Vec::new(),
    }
}

pub fn project(id: &str, category_id: &str, completed_date: &str) -> Project {
    Project {
        id: id.to_string(),
        slug: format!("project-{id}"),
        title: format!("Project {id}"),
        client: String::new(),
        category_id: category_id.to_string(),
        completed_date: completed_date.to_string(),
        summary: String::new(),
        content: String::new(),
        image: String::new(),
        featured: false,
        technologies: Vec::new(),
    }
}

pub fn testimonial(id: &str, name: &str) -> Testimonial {
    Testimonial {
        id: id.to_string(),
        quote: format!("Quote from {name}"),
        name: name.to_string(),
        role: String::new(),
        company: String::new(),
        avatar: String::new(),
        rating: 5,
    }
}

pub fn faq(id: &str, category: &str, question: &str) -> Faq {
    Faq {
        id: id.to_string(),
        question: question.to_string(),
        answer: format!("Answer to {question}"),
        category: category.to_string(),
    }
}

/// An in-memory store holding just posts, authors and categories.
pub fn store_with(posts: Vec<Post>, authors: Vec<Author>, categories: Vec<Category>) -> ContentStore {
    let mut store = ContentStore::default();
    store.posts = Collection::new(posts);
    store.authors = Collection::new(authors);
    store.categories = Collection::new(categories);
    store
}
