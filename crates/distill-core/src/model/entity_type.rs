//! Entity type tags for nodes of the entity tree.
//!
//! The tag set is closed: every node produced by a tree provider carries one of
//! these values, and the classification rules dispatch on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of program construct or syntax element a tree node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    // === Structure entities ===
    Class,
    Method,
    Field,

    // === Declaration roots ===
    TypeDeclaration,
    MethodDeclaration,
    FieldDeclaration,

    // === Declaration parts ===
    Modifiers,
    Modifier,
    Parameters,
    Parameter,
    TypeParameters,
    TypeParameter,
    Throws,
    SuperInterfaceTypes,
    Javadoc,
    LineComment,
    BlockComment,

    // === Type references ===
    PrimitiveType,
    SimpleType,
    QualifiedType,
    ParameterizedType,
    ArrayType,
    WildcardType,

    // === Statements ===
    AssertStatement,
    Assignment,
    BreakStatement,
    CatchClause,
    ClassInstanceCreation,
    ConstructorInvocation,
    ContinueStatement,
    DoStatement,
    ElseStatement,
    #[serde(rename = "FOREACH_STATEMENT")]
    EnhancedForStatement,
    #[serde(rename = "FINALLY")]
    FinallyStatement,
    ForStatement,
    IfStatement,
    LabeledStatement,
    MethodInvocation,
    PostfixExpression,
    PrefixExpression,
    ReturnStatement,
    SuperConstructorInvocation,
    SuperMethodInvocation,
    SwitchCase,
    SwitchStatement,
    SynchronizedStatement,
    ThenStatement,
    ThrowStatement,
    TryStatement,
    VariableDeclarationStatement,
    WhileStatement,
}

impl EntityType {
    /// True for method structure entities and method declaration roots.
    pub fn is_method(&self) -> bool {
        matches!(self, Self::Method | Self::MethodDeclaration)
    }

    /// True for field structure entities and field declaration roots.
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field | Self::FieldDeclaration)
    }

    /// True for class structure entities and type declaration roots.
    pub fn is_class(&self) -> bool {
        matches!(self, Self::Class | Self::TypeDeclaration)
    }

    /// True for type references (return types, field types, supertypes).
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            Self::PrimitiveType
                | Self::SimpleType
                | Self::QualifiedType
                | Self::ParameterizedType
                | Self::ArrayType
                | Self::WildcardType
        )
    }

    /// True for human-written comments (Javadoc excluded).
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment | Self::BlockComment)
    }

    /// True for statements of a method body.
    ///
    /// `ThenStatement` and `ElseStatement` are structure nodes of an `if` and
    /// are deliberately not statements.
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::AssertStatement
                | Self::Assignment
                | Self::BreakStatement
                | Self::CatchClause
                | Self::ClassInstanceCreation
                | Self::ConstructorInvocation
                | Self::ContinueStatement
                | Self::DoStatement
                | Self::EnhancedForStatement
                | Self::FinallyStatement
                | Self::ForStatement
                | Self::IfStatement
                | Self::LabeledStatement
                | Self::MethodInvocation
                | Self::PostfixExpression
                | Self::PrefixExpression
                | Self::ReturnStatement
                | Self::SuperConstructorInvocation
                | Self::SuperMethodInvocation
                | Self::SwitchCase
                | Self::SwitchStatement
                | Self::SynchronizedStatement
                | Self::ThrowStatement
                | Self::TryStatement
                | Self::VariableDeclarationStatement
                | Self::WhileStatement
        )
    }

    /// Statements whose value is a condition expression.
    pub fn has_condition(&self) -> bool {
        matches!(
            self,
            Self::IfStatement
                | Self::ForStatement
                | Self::WhileStatement
                | Self::DoStatement
                | Self::EnhancedForStatement
        )
    }

    /// True for the three kinds a `StructureEntityVersion` may carry.
    pub fn is_structure(&self) -> bool {
        matches!(self, Self::Class | Self::Method | Self::Field)
    }

    /// Declarations whose textual rendering embeds their own documentation.
    pub fn is_declaration(&self) -> bool {
        self.is_method() || self.is_field() || self.is_class()
    }

    /// The conventional upper-case name, e.g. `METHOD_DECLARATION`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Class => "CLASS",
            Self::Method => "METHOD",
            Self::Field => "FIELD",
            Self::TypeDeclaration => "TYPE_DECLARATION",
            Self::MethodDeclaration => "METHOD_DECLARATION",
            Self::FieldDeclaration => "FIELD_DECLARATION",
            Self::Modifiers => "MODIFIERS",
            Self::Modifier => "MODIFIER",
            Self::Parameters => "PARAMETERS",
            Self::Parameter => "PARAMETER",
            Self::TypeParameters => "TYPE_PARAMETERS",
            Self::TypeParameter => "TYPE_PARAMETER",
            Self::Throws => "THROWS",
            Self::SuperInterfaceTypes => "SUPER_INTERFACE_TYPES",
            Self::Javadoc => "JAVADOC",
            Self::LineComment => "LINE_COMMENT",
            Self::BlockComment => "BLOCK_COMMENT",
            Self::PrimitiveType => "PRIMITIVE_TYPE",
            Self::SimpleType => "SIMPLE_TYPE",
            Self::QualifiedType => "QUALIFIED_TYPE",
            Self::ParameterizedType => "PARAMETERIZED_TYPE",
            Self::ArrayType => "ARRAY_TYPE",
            Self::WildcardType => "WILDCARD_TYPE",
            Self::AssertStatement => "ASSERT_STATEMENT",
            Self::Assignment => "ASSIGNMENT",
            Self::BreakStatement => "BREAK_STATEMENT",
            Self::CatchClause => "CATCH_CLAUSE",
            Self::ClassInstanceCreation => "CLASS_INSTANCE_CREATION",
            Self::ConstructorInvocation => "CONSTRUCTOR_INVOCATION",
            Self::ContinueStatement => "CONTINUE_STATEMENT",
            Self::DoStatement => "DO_STATEMENT",
            Self::ElseStatement => "ELSE_STATEMENT",
            Self::EnhancedForStatement => "FOREACH_STATEMENT",
            Self::FinallyStatement => "FINALLY",
            Self::ForStatement => "FOR_STATEMENT",
            Self::IfStatement => "IF_STATEMENT",
            Self::LabeledStatement => "LABELED_STATEMENT",
            Self::MethodInvocation => "METHOD_INVOCATION",
            Self::PostfixExpression => "POSTFIX_EXPRESSION",
            Self::PrefixExpression => "PREFIX_EXPRESSION",
            Self::ReturnStatement => "RETURN_STATEMENT",
            Self::SuperConstructorInvocation => "SUPER_CONSTRUCTOR_INVOCATION",
            Self::SuperMethodInvocation => "SUPER_METHOD_INVOCATION",
            Self::SwitchCase => "SWITCH_CASE",
            Self::SwitchStatement => "SWITCH_STATEMENT",
            Self::SynchronizedStatement => "SYNCHRONIZED_STATEMENT",
            Self::ThenStatement => "THEN_STATEMENT",
            Self::ThrowStatement => "THROW_STATEMENT",
            Self::TryStatement => "TRY_STATEMENT",
            Self::VariableDeclarationStatement => "VARIABLE_DECLARATION_STATEMENT",
            Self::WhileStatement => "WHILE_STATEMENT",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_predicates() {
        assert!(EntityType::Method.is_method());
        assert!(EntityType::MethodDeclaration.is_method());
        assert!(EntityType::FieldDeclaration.is_field());
        assert!(EntityType::TypeDeclaration.is_class());
        assert!(!EntityType::Parameter.is_method());
        assert!(EntityType::Field.is_structure());
        assert!(!EntityType::FieldDeclaration.is_structure());
    }

    #[test]
    fn test_then_and_else_are_not_statements() {
        assert!(!EntityType::ThenStatement.is_statement());
        assert!(!EntityType::ElseStatement.is_statement());
        assert!(EntityType::IfStatement.is_statement());
        assert!(EntityType::IfStatement.has_condition());
        assert!(!EntityType::ReturnStatement.has_condition());
    }

    #[test]
    fn test_serde_name_matches_display() {
        let json = serde_json::to_string(&EntityType::MethodDeclaration).unwrap();
        assert_eq!(json, "\"METHOD_DECLARATION\"");
        assert_eq!(EntityType::MethodDeclaration.to_string(), "METHOD_DECLARATION");
    }
}
