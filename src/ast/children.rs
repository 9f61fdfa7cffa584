use crate::ast::{Node, VariableDeclarator};

/// Returns the direct children of `node` that analysis cares about, in source-visiting order.
///
/// Optional slots that are absent (a missing `else`, an empty `for` header) are skipped.
/// Node kinds without interesting children, including unknown ones, have none.
pub fn children(node: &Node) -> Vec<&Node> {
    match node {
        Node::Program(program) => program.body.iter().collect(),
        Node::BlockStatement(block) => block.body.iter().collect(),
        Node::WhileStatement(stmt) => vec![&*stmt.test, &*stmt.body],
        Node::ForStatement(stmt) => [&stmt.init, &stmt.test, &stmt.update]
            .into_iter()
            .flatten()
            .map(|node| &**node)
            .chain(std::iter::once(&*stmt.body))
            .collect(),
        Node::ExpressionStatement(stmt) => vec![&*stmt.expression],
        Node::IfStatement(stmt) => {
            let mut children = vec![&*stmt.test, &*stmt.consequent];
            if let Some(alternate) = &stmt.alternate {
                children.push(alternate);
            }
            children
        }
        Node::ReturnStatement(stmt) => stmt.argument.as_deref().into_iter().collect(),
        Node::FunctionDeclaration(func) => vec![&*func.body],
        Node::FunctionExpression(func) => vec![&*func.body],
        Node::ArrowFunctionExpression(func) => vec![&*func.body],
        Node::VariableDeclaration(decl) => decl
            .declarations
            .iter()
            .flat_map(VariableDeclarator::children)
            .collect(),
        Node::VariableDeclarator(declarator) => declarator.children(),
        Node::UnaryExpression(expr) => vec![&*expr.argument],
        Node::BinaryExpression(expr)
        | Node::LogicalExpression(expr)
        | Node::AssignmentExpression(expr) => vec![&*expr.left, &*expr.right],
        // alternate before consequent, hosts rely on this order
        Node::ConditionalExpression(expr) => vec![&*expr.test, &*expr.alternate, &*expr.consequent],
        Node::CallExpression(call) | Node::NewExpression(call) => call
            .arguments
            .iter()
            .chain(std::iter::once(&*call.callee))
            .collect(),
        Node::ArrayExpression(array) => array.elements.iter().flatten().collect(),
        Node::MemberExpression(member) => vec![&*member.object, &*member.property],
        Node::Property(property) => vec![&*property.key, &*property.value],
        Node::ObjectExpression(object) => object.properties.iter().collect(),
        Node::Identifier(_)
        | Node::Literal(_)
        | Node::BreakStatement(_)
        | Node::ContinueStatement(_)
        | Node::DebuggerStatement(_)
        | Node::ImportDeclaration(_)
        | Node::ImportSpecifier(_)
        | Node::ImportDefaultSpecifier(_)
        | Node::ImportNamespaceSpecifier(_)
        | Node::Unknown => Vec::new(),
    }
}

impl Node {
    pub fn children(&self) -> Vec<&Node> {
        children(self)
    }
}

impl VariableDeclarator {
    pub fn children(&self) -> Vec<&Node> {
        self.init.as_deref().into_iter().collect()
    }
}
