//! Client-side rendering assets. Written once into the output directory, next
//! to the generated pages, which reference them by relative path.

pub const TREE_CSS_NAME: &str = "tree.css";
pub const TREE_JS_NAME: &str = "tree.js";

pub const TREE_CSS: &str = r#"body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
  margin: 20px;
}

nav a {
  margin-right: 12px;
  font-weight: 600;
  text-decoration: none;
  color: #007bff;
}

.node circle {
  fill: #fff;
  stroke: steelblue;
  stroke-width: 1.5px;
}

.node text {
  font-size: 11px;
}

.node text.score {
  fill: #6c757d;
  font-size: 10px;
}

.link {
  fill: none;
  stroke: #ccc;
  stroke-width: 1.5px;
}

.timestamp {
  color: #6c757d;
  font-size: 12px;
  margin-top: 20px;
}
"#;

pub const TREE_JS: &str = r#"// Renders the global treeData as a top-down tree (d3 v3).
var margin = {top: 40, right: 40, bottom: 40, left: 40},
    width = 1400 - margin.left - margin.right,
    height = 800 - margin.top - margin.bottom;

var tree = d3.layout.tree().size([width, height]);

var diagonal = d3.svg.diagonal()
    .projection(function(d) { return [d.x, d.y]; });

var svg = d3.select("body").append("svg")
    .attr("width", width + margin.left + margin.right)
    .attr("height", height + margin.top + margin.bottom)
  .append("g")
    .attr("transform", "translate(" + margin.left + "," + margin.top + ")");

var nodes = tree.nodes(treeData);
var links = tree.links(nodes);

svg.selectAll("path.link")
    .data(links)
  .enter().append("path")
    .attr("class", "link")
    .attr("d", diagonal);

var node = svg.selectAll("g.node")
    .data(nodes)
  .enter().append("g")
    .attr("class", "node")
    .attr("transform", function(d) { return "translate(" + d.x + "," + d.y + ")"; });

node.append("circle")
    .attr("r", function(d) { return d.size ? Math.sqrt(d.size) / 2 : 5; });

node.append("text")
    .attr("dy", "-0.8em")
    .attr("text-anchor", "middle")
    .text(function(d) { return d.name; });

node.append("text")
    .attr("class", "score")
    .attr("dy", "1.8em")
    .attr("text-anchor", "middle")
    .text(function(d) { return d.score || ""; });
"#;
