//! Static site generation.
//!
//! Takes a loaded [`ContentStore`] and the merged [`SiteConfig`] and writes
//! the final HTML site. Every listing resolves its records once
//! ([`resolve_all`]) and then runs through a [`CollectionView`] per filter
//! option, so each tab of each grid becomes its own pre-rendered page.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): hero, featured project and post, testimonial
//!   carousel
//! - **Blog** (`/blog/`): all posts, one listing per category, paginated
//! - **Posts** (`/blog/{slug}/`): markdown body, author card, related posts
//! - **Portfolio** (`/work/`, `/work/{slug}/`): same shape as the blog
//! - **Careers** (`/careers/`, `/careers/{slug}/`): openings per department
//! - **FAQ** (`/faq/`): single-open accordion per FAQ category
//! - **Not found** (`/404.html`)
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── blog/
//! │   ├── index.html                  # All, page 1
//! │   ├── page/2/index.html           # All, page 2
//! │   ├── category/technology/index.html
//! │   └── shipping-rust-at-scale/index.html
//! ├── work/ ...
//! ├── careers/ ...
//! └── faq/
//!     ├── index.html
//!     └── category/billing/index.html
//! ```
//!
//! Broken references never stop the build: the resolver fills in the
//! configured fallback labels and the page renders anyway.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/site.js`: Carousel paging, swipe and autoplay
//!
//! HTML is built with [maud](https://maud.lambda.xyz/), which escapes every
//! interpolated value.

use crate::carousel::Carousel;
use crate::collection::{ALL, CollectionView, FilterState, PageSlice};
use crate::config::{self, CarouselConfig, SiteConfig};
use crate::content::{ContentStore, Faq, Testimonial};
use crate::disclosure::AccordionList;
use crate::naming::{humanize, slugify};
use crate::resolve::{RelatedQuery, find_featured, find_related, resolve_all};
use crate::schema::{
    self, JobView, PostView, ProjectView, SORT_DEFAULT, blog_view, careers_view, faq_view,
    portfolio_view,
};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output-relative paths of every written page, in write order.
    pub pages: Vec<String>,
    /// References that fell back to a placeholder label.
    pub broken_links: usize,
    /// Content generation the pages were rendered from.
    pub generation: String,
}

impl BuildReport {
    /// Number of pages under a top-level section (`"blog"`, `"careers"`, ...).
    pub fn section_count(&self, section: &str) -> usize {
        let prefix = format!("{section}/");
        self.pages.iter().filter(|p| p.starts_with(&prefix)).count()
    }
}

/// Top-level site sections, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Home,
    Work,
    Blog,
    Careers,
    Faq,
}

impl Section {
    const NAV: [Section; 5] = [
        Section::Home,
        Section::Work,
        Section::Blog,
        Section::Careers,
        Section::Faq,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Work => "Work",
            Section::Blog => "Blog",
            Section::Careers => "Careers",
            Section::Faq => "FAQ",
        }
    }

    fn href(self) -> &'static str {
        match self {
            Section::Home => "/",
            Section::Work => "/work/",
            Section::Blog => "/blog/",
            Section::Careers => "/careers/",
            Section::Faq => "/faq/",
        }
    }
}

/// Where a listing's filter tabs live: `{base}/` for "All",
/// `{base}/{segment}/{slug}/` for everything else.
struct ListingRoute {
    section: Section,
    base: &'static str,
    segment: &'static str,
}

const BLOG_ROUTE: ListingRoute = ListingRoute {
    section: Section::Blog,
    base: "blog",
    segment: "category",
};
const WORK_ROUTE: ListingRoute = ListingRoute {
    section: Section::Work,
    base: "work",
    segment: "category",
};
const CAREERS_ROUTE: ListingRoute = ListingRoute {
    section: Section::Careers,
    base: "careers",
    segment: "department",
};
const FAQ_ROUTE: ListingRoute = ListingRoute {
    section: Section::Faq,
    base: "faq",
    segment: "category",
};

impl ListingRoute {
    /// Output-relative directory for a filter option, with trailing slash.
    fn root(&self, option: &str) -> String {
        if option == ALL {
            format!("{}/", self.base)
        } else {
            format!("{}/{}/{}/", self.base, self.segment, slugify(option))
        }
    }

    /// Output-relative file for page `page` (zero-based) of a filter option.
    fn page_file(&self, option: &str, page: usize) -> String {
        if page == 0 {
            format!("{}index.html", self.root(option))
        } else {
            format!("{}page/{}/index.html", self.root(option), page + 1)
        }
    }

    fn page_href(&self, option: &str, page: usize) -> String {
        if page == 0 {
            format!("/{}", self.root(option))
        } else {
            format!("/{}page/{}/", self.root(option), page + 1)
        }
    }
}

/// Writes pages under the output directory and records them.
struct SiteWriter<'a> {
    output_dir: &'a Path,
    css: String,
    config: &'a SiteConfig,
    generation: &'a str,
    pages: Vec<String>,
}

impl SiteWriter<'_> {
    fn write(&mut self, rel: &str, title: &str, section: Section, main: Markup) -> Result<(), GenerateError> {
        let page_title = if title.is_empty() {
            self.config.site.title.clone()
        } else {
            format!("{} · {}", title, self.config.site.title)
        };
        let content = html! {
            (site_header(&self.config.site.title, section))
            (main)
            footer.site-footer {
                p { (self.config.site.title) }
            }
            script { (PreEscaped(JS)) }
        };
        let document = base_document(&page_title, &self.css, self.generation, content);

        let path = self.output_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, document.into_string())?;
        debug!(page = rel, "wrote page");
        self.pages.push(rel.to_string());
        Ok(())
    }
}

/// Render the whole site from `store` into `output_dir`.
pub fn generate(
    store: &ContentStore,
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    let color_css = config::generate_color_css(&config.colors);
    let css = format!("{}\n\n{}", color_css, CSS_STATIC);
    fs::create_dir_all(output_dir)?;

    let fallbacks = &config.fallbacks;
    let posts = resolve_all(store.posts.items(), &schema::post_relations(fallbacks), store);
    let jobs = resolve_all(store.jobs.items(), &schema::job_relations(fallbacks), store);
    let projects = resolve_all(
        store.projects.items(),
        &schema::project_relations(fallbacks),
        store,
    );

    let mut writer = SiteWriter {
        output_dir,
        css,
        config,
        generation: store.generation(),
        pages: Vec::new(),
    };

    writer.write(
        "index.html",
        "",
        Section::Home,
        render_home(config, &posts, &projects, store.testimonials.items()),
    )?;

    // Blog
    let mut blog = CollectionView::new(blog_view(config.blog.page_size), &config.blog.default_sort);
    write_listing(&mut writer, &BLOG_ROUTE, "Blog", &mut blog, &posts, post_card)?;
    for post in &posts {
        let related = find_related(
            post,
            &posts,
            &RelatedQuery::new("category.name", config.blog.related_limit),
        );
        let rel = format!("blog/{}/index.html", post.record.slug);
        writer.write(&rel, &post.record.title, Section::Blog, render_post(post, &related))?;
    }

    // Portfolio
    let mut work = CollectionView::new(
        portfolio_view(config.portfolio.page_size),
        &config.portfolio.default_sort,
    );
    write_listing(&mut writer, &WORK_ROUTE, "Work", &mut work, &projects, project_card)?;
    for project in &projects {
        let related = find_related(
            project,
            &projects,
            &RelatedQuery::new("category.name", config.portfolio.related_limit),
        );
        let rel = format!("work/{}/index.html", project.record.slug);
        writer.write(
            &rel,
            &project.record.title,
            Section::Work,
            render_project(project, &related),
        )?;
    }

    // Careers
    let mut careers = CollectionView::new(careers_view(), &config.careers.default_sort);
    write_listing(&mut writer, &CAREERS_ROUTE, "Careers", &mut careers, &jobs, job_card)?;
    for job in &jobs {
        let others = find_related(job, &jobs, &RelatedQuery::new("department.name", 3));
        let rel = format!("careers/{}/index.html", job.record.slug);
        writer.write(&rel, &job.record.title, Section::Careers, render_job(job, &others))?;
    }

    // FAQ
    let faqs = store.faqs.items();
    let mut accordion = AccordionList::new(faq_view(), SORT_DEFAULT, config.faq.reset_on_filter);
    let options = accordion.view().filter_options(faqs);
    for option in &options {
        accordion.set_filter(option);
        let rows = accordion.rows(faqs);
        let main = render_faq(&options, accordion.view().state(), &rows);
        writer.write(&FAQ_ROUTE.page_file(option, 0), "FAQ", Section::Faq, main)?;
    }

    writer.write("404.html", "Not found", Section::Home, render_not_found())?;

    let broken_links = schema::audit(store, fallbacks).len();
    info!(
        pages = writer.pages.len(),
        broken_links,
        output = %output_dir.display(),
        "site generated"
    );
    Ok(BuildReport {
        pages: writer.pages,
        broken_links,
        generation: store.generation().to_string(),
    })
}

/// One page per (filter option, page number) of a listing.
fn write_listing<T>(
    writer: &mut SiteWriter<'_>,
    route: &ListingRoute,
    heading: &str,
    view: &mut CollectionView<T>,
    items: &[T],
    card: fn(&T) -> Markup,
) -> Result<(), GenerateError> {
    let options = view.filter_options(items);
    for option in &options {
        view.set_filter(option);
        let page_count = view.page(items, 0).page_count;
        for n in 0..page_count {
            let slice = view.page(items, n);
            let main = render_listing(
                route,
                heading,
                &options,
                view.state(),
                &view.transition_key(),
                &slice,
                card,
            );
            writer.write(&route.page_file(option, n), heading, route.section, main)?;
        }
    }
    view.set_filter(ALL);
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, generation: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if !generation.is_empty() {
                    meta name="content-generation" content=(generation);
                }
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the site header with the section navigation
fn site_header(site_title: &str, current: Section) -> Markup {
    html! {
        header.site-header {
            a.brand href="/" { (site_title) }
            nav.site-nav {
                ul {
                    @for section in Section::NAV {
                        @let is_current = section == current;
                        li class=[is_current.then_some("current")] {
                            a href=(section.href()) aria-current=[is_current.then_some("page")] {
                                (section.label())
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Filter tabs for a listing. The active tab carries `aria-current`.
fn filter_tabs(route: &ListingRoute, options: &[String], state: &FilterState) -> Markup {
    html! {
        nav.filters aria-label="Filter" {
            @for option in options {
                @let active = *option == state.active_filter;
                a.filter.active[active]
                    href=(route.page_href(option, 0))
                    aria-current=[active.then_some("page")] {
                    (option)
                }
            }
        }
    }
}

fn pager(route: &ListingRoute, option: &str, page: usize, page_count: usize) -> Markup {
    html! {
        @if page_count > 1 {
            nav.pager aria-label="Pages" {
                @if page > 0 {
                    a.prev href=(route.page_href(option, page - 1)) rel="prev" { "← Newer" }
                }
                span.page-status { "Page " (page + 1) " of " (page_count) }
                @if page + 1 < page_count {
                    a.next href=(route.page_href(option, page + 1)) rel="next" { "Older →" }
                }
            }
        }
    }
}

fn render_listing<T>(
    route: &ListingRoute,
    heading: &str,
    options: &[String],
    state: &FilterState,
    transition_key: &str,
    slice: &PageSlice<'_, T>,
    card: fn(&T) -> Markup,
) -> Markup {
    html! {
        main.listing-page {
            header.listing-header {
                h1 { (heading) }
                (filter_tabs(route, options, state))
                p.listing-meta {
                    (slice.total) " "
                    @if slice.total == 1 { "entry" } @else { "entries" }
                    " · sorted by " (state.sort_key)
                }
            }
            @if slice.items.is_empty() {
                p.empty { "Nothing here yet." }
            } @else {
                div.card-grid data-transition-key=(transition_key) {
                    @for item in &slice.items {
                        (card(item))
                    }
                }
            }
            (pager(route, &state.active_filter, slice.page, slice.page_count))
        }
    }
}

/// Author avatar, name and date line shared by cards and post pages.
fn byline(post: &PostView<'_>) -> Markup {
    let avatar = post.text("author", "avatar");
    html! {
        div.byline {
            @if !avatar.is_empty() {
                img.avatar src=(avatar) alt="" loading="lazy";
            }
            span.author { (post.text("author", "name")) }
            time datetime=(post.record.publish_date) { (post.record.publish_date) }
            @if post.record.read_time > 0 {
                span.read-time { (post.record.read_time) " min read" }
            }
        }
    }
}

fn post_card(post: &PostView<'_>) -> Markup {
    let record = post.record;
    html! {
        article.card.post-card {
            @if !record.image.is_empty() {
                img src=(record.image) alt=(record.title) loading="lazy";
            }
            span.badge { (post.text("category", "name")) }
            h3 { a href={ "/blog/" (record.slug) "/" } { (record.title) } }
            @if !record.excerpt.is_empty() {
                p.excerpt { (record.excerpt) }
            }
            (byline(post))
        }
    }
}

fn project_card(project: &ProjectView<'_>) -> Markup {
    let record = project.record;
    html! {
        article.card.project-card {
            @if !record.image.is_empty() {
                img src=(record.image) alt=(record.title) loading="lazy";
            }
            span.badge { (project.text("category", "name")) }
            h3 { a href={ "/work/" (record.slug) "/" } { (record.title) } }
            @if !record.client.is_empty() {
                p.client { (record.client) }
            }
            @if !record.summary.is_empty() {
                p.excerpt { (record.summary) }
            }
        }
    }
}

fn job_card(job: &JobView<'_>) -> Markup {
    let record = job.record;
    html! {
        article.card.job-card {
            span.badge { (job.text("department", "name")) }
            h3 { a href={ "/careers/" (record.slug) "/" } { (record.title) } }
            (job_facts(job))
        }
    }
}

fn job_facts(job: &JobView<'_>) -> Markup {
    let record = job.record;
    html! {
        ul.facts {
            @if !record.location.is_empty() {
                li.location { (record.location) }
            }
            @if !record.employment_type.is_empty() {
                li.employment-type { (humanize(&record.employment_type)) }
            }
            @if !record.salary.is_empty() {
                li.salary { (record.salary) }
            }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(markdown, options);
    let mut body = String::new();
    md_html::push_html(&mut body, parser);
    body
}

/// Testimonial slides with the first one active. The indicator dots and
/// data attributes drive `site.js`.
fn render_carousel(items: &[Testimonial], carousel: &Carousel, settings: &CarouselConfig) -> Markup {
    html! {
        @if !carousel.is_empty() {
            section.testimonials.carousel
                aria-roledescription="carousel"
                data-swipe-threshold=(settings.swipe_threshold)
                data-autoplay-ms=(settings.autoplay_ms)
                data-direction=(carousel.direction().delta()) {
                h2 { "What clients say" }
                div.slides {
                    @for (i, t) in items.iter().enumerate() {
                        @let active = i == carousel.index();
                        figure.slide.active[active]
                            data-index=(i)
                            aria-hidden=[(!active).then_some("true")] {
                            blockquote { (t.quote) }
                            figcaption {
                                @if !t.avatar.is_empty() {
                                    img.avatar src=(t.avatar) alt="" loading="lazy";
                                }
                                span.name { (t.name) }
                                @if !t.role.is_empty() || !t.company.is_empty() {
                                    span.role {
                                        (t.role)
                                        @if !t.role.is_empty() && !t.company.is_empty() { ", " }
                                        (t.company)
                                    }
                                }
                                span.rating aria-label={ (t.rating) " out of 5" } {
                                    ("★".repeat(t.rating as usize))
                                }
                            }
                        }
                    }
                }
                @if carousel.len() > 1 {
                    button.carousel-prev type="button" aria-label="Previous" { "‹" }
                    button.carousel-next type="button" aria-label="Next" { "›" }
                    nav.dots {
                        @for i in 0..carousel.len() {
                            @let current = i == carousel.index();
                            button.dot.active[current]
                                type="button"
                                data-target=(i)
                                aria-current=[current.then_some("true")]
                                aria-label={ "Show testimonial " (i + 1) } {}
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(
    config: &SiteConfig,
    posts: &[PostView<'_>],
    projects: &[ProjectView<'_>],
    testimonials: &[Testimonial],
) -> Markup {
    let featured_post = find_featured(posts);
    let featured_project = find_featured(projects);
    let carousel = Carousel::new(testimonials.len());

    html! {
        main.home-page {
            section.hero {
                h1 { (config.site.title) }
                @if !config.site.tagline.is_empty() {
                    p.tagline { (config.site.tagline) }
                }
                a.cta href="/work/" { "See our work" }
            }
            @if featured_project.is_some() || featured_post.is_some() {
                section.featured {
                    @if let Some(project) = featured_project {
                        (project_card(project))
                    }
                    @if let Some(post) = featured_post {
                        (post_card(post))
                    }
                }
            }
            (render_carousel(testimonials, &carousel, &config.carousel))
        }
    }
}

fn render_post(post: &PostView<'_>, related: &[&PostView<'_>]) -> Markup {
    let record = post.record;
    let role = post.text("author", "role");
    html! {
        main.post-page {
            article {
                header {
                    a.badge href={ "/blog/category/" (post.text("category", "slug")) "/" } {
                        (post.text("category", "name"))
                    }
                    h1 { (record.title) }
                    (byline(post))
                    @if !role.is_empty() {
                        p.author-role { (role) }
                    }
                }
                @if !record.image.is_empty() {
                    img.hero-image src=(record.image) alt=(record.title);
                }
                div.prose {
                    (PreEscaped(markdown_to_html(&record.content)))
                }
                @if !record.tags.is_empty() {
                    ul.tags {
                        @for tag in &record.tags {
                            li { (tag) }
                        }
                    }
                }
            }
            @if !related.is_empty() {
                aside.related {
                    h2 { "More in " (post.text("category", "name")) }
                    div.card-grid {
                        @for item in related {
                            (post_card(item))
                        }
                    }
                }
            }
        }
    }
}

fn render_project(project: &ProjectView<'_>, related: &[&ProjectView<'_>]) -> Markup {
    let record = project.record;
    html! {
        main.project-page {
            article {
                header {
                    span.badge { (project.text("category", "name")) }
                    h1 { (record.title) }
                    @if !record.client.is_empty() {
                        p.client { "Client: " (record.client) }
                    }
                    time datetime=(record.completed_date) { (record.completed_date) }
                }
                @if !record.image.is_empty() {
                    img.hero-image src=(record.image) alt=(record.title);
                }
                div.prose {
                    (PreEscaped(markdown_to_html(&record.content)))
                }
                @if !record.technologies.is_empty() {
                    ul.tags {
                        @for tech in &record.technologies {
                            li { (tech) }
                        }
                    }
                }
            }
            @if !related.is_empty() {
                aside.related {
                    h2 { "Related work" }
                    div.card-grid {
                        @for item in related {
                            (project_card(item))
                        }
                    }
                }
            }
        }
    }
}

fn render_job(job: &JobView<'_>, others: &[&JobView<'_>]) -> Markup {
    let record = job.record;
    html! {
        main.job-page {
            article {
                header {
                    span.badge { (job.text("department", "name")) }
                    h1 { (record.title) }
                    (job_facts(job))
                    time datetime=(record.posted_date) { "Posted " (record.posted_date) }
                }
                @if !record.summary.is_empty() {
                    p.summary { (record.summary) }
                }
                @if !record.responsibilities.is_empty() {
                    h2 { "What you'll do" }
                    ul { @for item in &record.responsibilities { li { (item) } } }
                }
                @if !record.requirements.is_empty() {
                    h2 { "What we're looking for" }
                    ul { @for item in &record.requirements { li { (item) } } }
                }
            }
            @if !others.is_empty() {
                aside.related {
                    h2 { "More openings in " (job.text("department", "name")) }
                    div.card-grid {
                        @for item in others {
                            (job_card(item))
                        }
                    }
                }
            }
        }
    }
}

/// FAQ accordion. Rows render as `<details>`, the open row (if any) with
/// `open` set.
fn render_faq(options: &[String], state: &FilterState, rows: &[(&Faq, bool)]) -> Markup {
    html! {
        main.faq-page {
            header.listing-header {
                h1 { "Frequently asked questions" }
                (filter_tabs(&FAQ_ROUTE, options, state))
            }
            @if rows.is_empty() {
                p.empty { "No questions yet." }
            } @else {
                div.accordion {
                    @for (i, (faq, open)) in rows.iter().enumerate() {
                        details.faq-item open[*open] data-index=(i) {
                            summary { (faq.question) }
                            div.answer { (PreEscaped(markdown_to_html(&faq.answer))) }
                        }
                    }
                }
            }
        }
    }
}

fn render_not_found() -> Markup {
    html! {
        main.not-found-page {
            h1 { "Page not found" }
            p { "The page you are looking for does not exist or has moved." }
            a.cta href="/" { "Back to home" }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{self, Collection};
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn read(dir: &Path, rel: &str) -> String {
        fs::read_to_string(dir.join(rel)).unwrap()
    }

    fn full_store() -> ContentStore {
        let mut p1 = post("1", "tech", "2024-01-01");
        p1.content = "Hello **world**".into();
        let mut p2 = post("2", "tech", "2024-02-01");
        p2.featured = true;
        let mut p3 = post("3", "design", "2024-03-01");
        p3.author_id = "ghost".into();

        let mut store = store_with(
            vec![p1, p2, p3],
            vec![author("ada", "Ada")],
            vec![category("tech", "Tech"), category("design", "Design")],
        );
        store.departments = Collection::new(vec![department("eng", "Engineering")]);
        store.jobs = Collection::new(vec![
            job("1", "eng", "2024-01-01"),
            job("2", "eng", "2024-02-01"),
            job("3", "ops", "2024-03-01"),
        ]);
        store.projects = Collection::new(vec![project("1", "design", "2023-05-01")]);
        store.testimonials = Collection::new(vec![
            testimonial("1", "Grace"),
            testimonial("2", "Linus"),
        ]);
        store.faqs = Collection::new(vec![
            faq("1", "Billing", "Can I pay yearly?"),
            faq("2", "Support", "How do I reach you?"),
        ]);
        store
    }

    #[test]
    fn listing_routes() {
        assert_eq!(BLOG_ROUTE.page_file(ALL, 0), "blog/index.html");
        assert_eq!(BLOG_ROUTE.page_file(ALL, 1), "blog/page/2/index.html");
        assert_eq!(BLOG_ROUTE.page_file("Product Design", 0), "blog/category/product-design/index.html");
        assert_eq!(CAREERS_ROUTE.page_href("Engineering", 2), "/careers/department/engineering/page/3/");
    }

    #[test]
    fn base_document_includes_doctype_and_generation() {
        let html = base_document("Test", "", "abc123", html! {}).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"content="abc123""#));

        let html = base_document("Test", "", "", html! {}).into_string();
        assert!(!html.contains("content-generation"));
    }

    #[test]
    fn site_header_marks_current_section() {
        let html = site_header("Studio", Section::Blog).into_string();
        assert!(html.contains(r#"<li class="current"><a href="/blog/" aria-current="page">Blog</a>"#));
        assert!(html.contains(r#"<a href="/work/">Work</a>"#));
    }

    #[test]
    fn carousel_marks_first_slide_active() {
        let items = vec![testimonial("1", "Grace"), testimonial("2", "Linus")];
        let carousel = Carousel::new(items.len());
        let html = render_carousel(&items, &carousel, &CarouselConfig::default()).into_string();
        assert!(html.contains(r#"class="slide active" data-index="0""#));
        assert!(html.contains(r#"data-index="1" aria-hidden="true""#));
        assert!(html.contains(r#"data-swipe-threshold="10000""#));
        assert_eq!(html.matches("data-target=").count(), 2);
    }

    #[test]
    fn carousel_omits_controls_for_single_slide() {
        let items = vec![testimonial("1", "Grace")];
        let html = render_carousel(&items, &Carousel::new(1), &CarouselConfig::default()).into_string();
        assert!(html.contains("Grace"));
        assert!(!html.contains("carousel-next"));
        assert!(!html.contains("class=\"dot"));
    }

    #[test]
    fn empty_carousel_renders_nothing() {
        let html = render_carousel(&[], &Carousel::new(0), &CarouselConfig::default()).into_string();
        assert!(html.is_empty());
    }

    #[test]
    fn faq_renders_open_row() {
        let faqs = vec![faq("1", "Billing", "Why?"), faq("2", "Billing", "How?")];
        let mut list = AccordionList::new(faq_view(), SORT_DEFAULT, true);
        list.toggle(1, &faqs);
        let options = list.view().filter_options(&faqs);
        let rows = list.rows(&faqs);
        let html = render_faq(&options, list.view().state(), &rows).into_string();
        assert!(html.contains(r#"<details class="faq-item" data-index="0">"#));
        assert!(html.contains(r#"<details class="faq-item" open data-index="1">"#));
    }

    #[test]
    fn markdown_is_rendered() {
        assert_eq!(markdown_to_html("Hello **world**"), "<p>Hello <strong>world</strong></p>\n");
    }

    #[test]
    fn html_escape_in_maud() {
        let html = html! { p { ("<script>alert(1)</script>") } }.into_string();
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn generate_writes_every_surface() {
        let tmp = TempDir::new().unwrap();
        let store = full_store();
        let report = generate(&store, &SiteConfig::default(), tmp.path()).unwrap();

        for rel in [
            "index.html",
            "404.html",
            "blog/index.html",
            "blog/category/tech/index.html",
            "blog/category/design/index.html",
            "blog/post-1/index.html",
            "work/index.html",
            "work/project-1/index.html",
            "careers/index.html",
            "careers/department/engineering/index.html",
            "careers/department/general/index.html",
            "careers/job-3/index.html",
            "faq/index.html",
            "faq/category/billing/index.html",
        ] {
            assert!(tmp.path().join(rel).exists(), "missing {rel}");
            assert!(report.pages.iter().any(|p| p == rel), "unreported {rel}");
        }
        assert_eq!(report.broken_links, 2);
        assert_eq!(report.section_count("careers"), 6);
    }

    #[test]
    fn broken_references_render_fallbacks() {
        let tmp = TempDir::new().unwrap();
        generate(&full_store(), &SiteConfig::default(), tmp.path()).unwrap();

        let post = read(tmp.path(), "blog/post-3/index.html");
        assert!(post.contains("Unknown Author"));
        assert!(!post.contains("ghost"));

        let job = read(tmp.path(), "careers/job-3/index.html");
        assert!(job.contains("General"));
    }

    #[test]
    fn post_page_lists_related_in_same_category() {
        let tmp = TempDir::new().unwrap();
        generate(&full_store(), &SiteConfig::default(), tmp.path()).unwrap();

        let html = read(tmp.path(), "blog/post-1/index.html");
        assert!(html.contains("<strong>world</strong>"));
        assert!(html.contains("More in Tech"));
        assert!(html.contains(r#"href="/blog/post-2/""#));
        assert!(!html.contains(r#"href="/blog/post-3/""#));
    }

    #[test]
    fn home_shows_featured_post() {
        let tmp = TempDir::new().unwrap();
        generate(&full_store(), &SiteConfig::default(), tmp.path()).unwrap();

        let html = read(tmp.path(), "index.html");
        assert!(html.contains(r#"href="/blog/post-2/""#));
        assert!(html.contains("Grace"));
    }

    #[test]
    fn blog_listing_marks_active_filter() {
        let tmp = TempDir::new().unwrap();
        generate(&full_store(), &SiteConfig::default(), tmp.path()).unwrap();

        let html = read(tmp.path(), "blog/category/tech/index.html");
        assert!(html.contains(r#"class="filter active" href="/blog/category/tech/" aria-current="page""#));
        assert!(html.contains(r#"data-transition-key="Tech-latest""#));
        assert!(html.contains(r#"href="/blog/post-1/""#));
        assert!(!html.contains(r#"href="/blog/post-3/""#));
    }

    #[test]
    fn listings_paginate() {
        let tmp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.blog.page_size = 2;
        let report = generate(&full_store(), &config, tmp.path()).unwrap();

        assert!(report.pages.iter().any(|p| p == "blog/page/2/index.html"));
        let html = read(tmp.path(), "blog/index.html");
        assert!(html.contains("Page 1 of 2"));
        assert!(html.contains(r#"href="/blog/page/2/""#));
    }

    #[test]
    fn unsluggable_title_does_not_replace_listing() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("content");
        fs::create_dir_all(&src).unwrap();
        fs::write(
            src.join("posts.json"),
            r#"[{"id":"p1","title":"!!!","authorId":"a","categoryId":"c","publishDate":"2024-01-01"}]"#,
        )
        .unwrap();
        let store = content::load(&src).unwrap();
        let out = tmp.path().join("dist");
        let report = generate(&store, &SiteConfig::default(), &out).unwrap();

        assert!(report.pages.iter().any(|p| p == "blog/p1/index.html"));
        assert!(!report.pages.iter().any(|p| p.contains("//")));
        let listing = read(&out, "blog/index.html");
        assert!(listing.contains(r#"href="/blog/p1/""#));
        assert!(listing.contains(r#"class="filter active""#));
    }

    #[test]
    fn fixture_site_builds() {
        let tmp = setup_fixtures();
        let store = content::load(tmp.path()).unwrap();
        let config = config::load_config(tmp.path()).unwrap();
        let out = tmp.path().join("dist");
        let report = generate(&store, &config, &out).unwrap();

        assert_eq!(report.generation, store.generation());
        assert!(report.section_count("blog") >= store.posts.len());
        let home = read(&out, "index.html");
        assert!(home.contains(&config.site.title));
    }
}
