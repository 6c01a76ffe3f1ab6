// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]
#![allow(clippy::expect_used)]

use trailfold_graph::{make_rel_type_id, MemoryGraph, Node, NodeId, Path, RelTypeId};

/// Offset of the department node on every fixture path.
pub const DEPARTMENT_OFFSET: isize = 1;
/// Offset of the employee node on every fixture path.
pub const EMPLOYEE_OFFSET: isize = 2;
/// Offset of the country node (the end node) on every fixture path.
pub const COUNTRY_OFFSET: isize = 0;

/// One small org chart with five company → department → employee →
/// country walks, one per employee:
///
/// | employee | salary | department | country | position |
/// |----------|--------|------------|---------|----------|
/// | Anders   |  10000 | DeptC      | Sweden  | boss     |
/// | Bertil   | 120000 | DeptC      | Finland | dev      |
/// | Ceasar   | 150000 | DeptC      | Sweden  | dev      |
/// | David    |  12345 | DeptD      | Finland | boss     |
/// | Emil     |  54321 | DeptD      | Finland | dev      |
///
/// Department relationships are stored department → company and WORKS_FOR
/// / LIVES_IN are stored employee → department / country, so the walks
/// cross the first two against their stored direction.
pub struct CompanyFixture {
    pub graph: MemoryGraph,
    pub company: NodeId,
    pub dept_c: NodeId,
    pub dept_d: NodeId,
    pub sweden: NodeId,
    pub finland: NodeId,
    pub department_ty: RelTypeId,
    pub works_for: RelTypeId,
    pub lives_in: RelTypeId,
    /// Paths in employee-name order: Anders, Bertil, Ceasar, David, Emil.
    pub paths: Vec<Path>,
}

impl CompanyFixture {
    /// Mints a handle for a fixture node.
    pub fn node(&self, id: NodeId) -> Node {
        self.graph.node(id).expect("fixture node exists")
    }
}

/// Builds the org chart and assembles one walk per employee.
pub fn company_fixture() -> CompanyFixture {
    let mut graph = MemoryGraph::new();

    let company = graph.create_node();
    graph
        .set_node_property(company, "name", "The Firm")
        .expect("node exists");

    let dept_c = graph.create_node();
    graph
        .set_node_property(dept_c, "name", "DeptC")
        .expect("node exists");
    graph
        .set_node_property(dept_c, "department", "c")
        .expect("node exists");
    let dept_d = graph.create_node();
    graph
        .set_node_property(dept_d, "name", "DeptD")
        .expect("node exists");
    graph
        .set_node_property(dept_d, "department", "d")
        .expect("node exists");

    let sweden = graph.create_node();
    graph
        .set_node_property(sweden, "name", "Sweden")
        .expect("node exists");
    let finland = graph.create_node();
    graph
        .set_node_property(finland, "name", "Finland")
        .expect("node exists");

    let department_ty = make_rel_type_id("DEPARTMENT");
    let works_for = make_rel_type_id("WORKS_FOR");
    let lives_in = make_rel_type_id("LIVES_IN");

    let r_dept_c = graph
        .create_relationship(dept_c, company, department_ty)
        .expect("nodes exist");
    let r_dept_d = graph
        .create_relationship(dept_d, company, department_ty)
        .expect("nodes exist");

    let employees = [
        ("Anders", 10000_i64, dept_c, sweden, "boss", r_dept_c),
        ("Bertil", 120000, dept_c, finland, "dev", r_dept_c),
        ("Ceasar", 150000, dept_c, sweden, "dev", r_dept_c),
        ("David", 12345, dept_d, finland, "boss", r_dept_d),
        ("Emil", 54321, dept_d, finland, "dev", r_dept_d),
    ];

    let mut paths = Vec::new();
    for (name, salary, dept, country, position, dept_rel) in employees {
        let employee = graph.create_node();
        graph
            .set_node_property(employee, "name", name)
            .expect("node exists");
        graph
            .set_node_property(employee, "salary", salary)
            .expect("node exists");
        let works = graph
            .create_relationship(employee, dept, works_for)
            .expect("nodes exist");
        graph
            .set_relationship_property(works, "position", position)
            .expect("relationship exists");
        let lives = graph
            .create_relationship(employee, country, lives_in)
            .expect("nodes exist");
        paths.push(
            graph
                .assemble_path(company, &[dept_rel, works, lives])
                .expect("connected"),
        );
    }

    CompanyFixture {
        graph,
        company,
        dept_c,
        dept_d,
        sweden,
        finland,
        department_ty,
        works_for,
        lives_in,
        paths,
    }
}
