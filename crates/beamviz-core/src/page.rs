use chrono::Utc;

/// Everything the page template needs for one record.
pub struct PageContext<'a> {
    /// Position of this record within the batch, drives the file name and the
    /// wraparound PREV/NEXT links.
    pub index: usize,
    pub total: usize,
    pub sent: &'a str,
    pub image_src: Option<String>,
    /// Nested tree JSON, embedded verbatim as `treeData`.
    pub tree_json: &'a str,
}

pub fn page_file_name(index: usize) -> String {
    format!("{index:06}.html")
}

pub fn render_page(ctx: &PageContext) -> String {
    let total = ctx.total.max(1);
    let url_prev = page_file_name((ctx.index + total - 1) % total);
    let url_next = page_file_name((ctx.index + 1) % total);

    let img_tag = match &ctx.image_src {
        Some(src) => format!(
            r#"<img src="{}" width="400px"/>"#,
            html_escape(src)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Beam Search</title>
    <link rel="stylesheet" type="text/css" href="tree.css">
    <script src="https://d3js.org/d3.v3.min.js"></script>
  </head>
  <body>
    <nav>
      <a href="{url_prev}">PREV</a>
      <a href="{url_next}">NEXT</a>
    </nav>
    {img_tag}
    <h3>{sent}</h3>
    <script>
      var treeData = {tree_json};
    </script>
    <script src="tree.js"></script>
    <div class="timestamp">Generated: {timestamp}</div>
  </body>
</html>"#,
        url_prev = url_prev,
        url_next = url_next,
        img_tag = img_tag,
        sent = html_escape(ctx.sent),
        tree_json = ctx.tree_json,
        timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
