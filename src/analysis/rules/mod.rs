pub mod break_statement;
pub mod continue_statement;
pub mod if_statement;
pub mod member_expression;
