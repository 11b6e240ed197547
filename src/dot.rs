use std::fmt::Display;

use crate::tree::DecisionTree;

impl<V: Display> DecisionTree<V> {
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape=circle, fixedsize=true];")?;

        let mut next_id = 0;
        emit(self, &mut dot, &mut next_id)?;

        write!(dot, "}}")?;
        Ok(dot)
    }
}

// Dashed edge = low (false) branch, solid edge = high (true) branch.
fn emit<V: Display>(
    node: &DecisionTree<V>,
    dot: &mut String,
    next_id: &mut usize,
) -> Result<usize, std::fmt::Error> {
    use std::fmt::Write as _;

    let id = *next_id;
    *next_id += 1;

    match node {
        DecisionTree::Leaf(value) => {
            let label = if *value { "1" } else { "0" };
            writeln!(dot, "{} [shape=square, label=\"{}\"];", id, label)?;
        }
        DecisionTree::Node { var, low, high } => {
            writeln!(dot, "{} [label=\"{}\"];", id, var)?;
            let low_id = emit(low, dot, next_id)?;
            let high_id = emit(high, dot, next_id)?;
            writeln!(dot, "{} -> {} [style=dashed];", id, low_id)?;
            writeln!(dot, "{} -> {};", id, high_id)?;
        }
    }
    Ok(id)
}
