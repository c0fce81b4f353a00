use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::record::{ActiveStatus, Employee, Record};

/// Employee node in the reporting tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgNode {
    pub id: String,
    pub name: String,
    pub designation: String,
    pub status: ActiveStatus,
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    /// This node plus all descendants
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(OrgNode::size).sum::<usize>()
    }

    pub fn find(&self, id: &str) -> Option<&OrgNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// Reporting tree built from the flat employee list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrgChart {
    pub roots: Vec<OrgNode>,
    unreachable: Vec<String>,
}

impl OrgChart {
    /// Attach every employee under its manager in one pass over the list.
    ///
    /// Employees without a manager, or whose manager is not in the list,
    /// become roots. Manager cycles are left as they are: the employees
    /// involved never surface under a root and are reported by
    /// [`OrgChart::unreachable`] instead.
    pub fn build(employees: &[Employee]) -> Self {
        let known: HashSet<&str> = employees.iter().map(|e| e.id()).collect();
        let mut children: HashMap<&str, Vec<&Employee>> = HashMap::new();
        let mut roots = Vec::new();

        for employee in employees {
            match employee.manager() {
                Some(manager) if known.contains(manager) => {
                    children.entry(manager).or_default().push(employee)
                }
                _ => roots.push(employee),
            }
        }

        let roots: Vec<OrgNode> = roots
            .into_iter()
            .map(|root| attach(root, &mut children))
            .collect();

        let mut surfaced = HashSet::new();
        roots.iter().for_each(|root| collect_ids(root, &mut surfaced));
        let unreachable: Vec<String> = employees
            .iter()
            .filter(|e| !surfaced.contains(e.id()))
            .map(|e| e.id().to_string())
            .collect();

        if !unreachable.is_empty() {
            tracing::warn!(
                employees = ?unreachable,
                "Reporting cycle keeps employees out of the org chart"
            );
        }

        Self { roots, unreachable }
    }

    /// Employees caught in a manager cycle
    pub fn unreachable(&self) -> &[String] {
        &self.unreachable
    }

    pub fn node_count(&self) -> usize {
        self.roots.iter().map(OrgNode::size).sum()
    }

    pub fn find(&self, id: &str) -> Option<&OrgNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }
}

fn attach<'a>(employee: &'a Employee, children: &mut HashMap<&'a str, Vec<&'a Employee>>) -> OrgNode {
    let reports = children.remove(employee.id()).unwrap_or_default();
    OrgNode {
        id: employee.id.clone(),
        name: employee.name.clone(),
        designation: employee.designation.clone(),
        status: employee.status,
        children: reports
            .into_iter()
            .map(|report| attach(report, children))
            .collect(),
    }
}

fn collect_ids<'a>(node: &'a OrgNode, ids: &mut HashSet<&'a str>) {
    ids.insert(node.id.as_str());
    node.children.iter().for_each(|child| collect_ids(child, ids));
}

/// Expand/collapse state of a rendered chart; nodes start expanded
#[derive(Debug, Clone, Default)]
pub struct OrgChartView {
    collapsed: HashSet<String>,
}

impl OrgChartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        !self.collapsed.contains(id)
    }

    /// Flip a node and return its new expanded state
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.to_string());
            return false;
        }
        true
    }

    /// Depth-first rows to render, skipping children of collapsed nodes
    pub fn visible_rows<'a>(&self, chart: &'a OrgChart) -> Vec<(usize, &'a OrgNode)> {
        let mut rows = Vec::new();
        for root in &chart.roots {
            self.push_rows(root, 0, &mut rows);
        }
        rows
    }

    fn push_rows<'a>(&self, node: &'a OrgNode, depth: usize, rows: &mut Vec<(usize, &'a OrgNode)>) {
        rows.push((depth, node));
        if self.is_expanded(&node.id) {
            for child in &node.children {
                self.push_rows(child, depth + 1, rows);
            }
        }
    }
}
