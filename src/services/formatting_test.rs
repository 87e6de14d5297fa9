use super::*;

#[test]
fn protect_replaces_each_kind_with_placeholders() {
    let protected = protect("Run ```\nros2 run\n``` then `colcon build` and solve $x^2$.");
    assert_eq!(
        protected.text,
        "Run {CODE_BLOCK_0} then {INLINE_CODE_0} and solve {EQUATION_0}."
    );
    assert_eq!(protected.code_blocks, ["```\nros2 run\n```"]);
    assert_eq!(protected.inline_code, ["`colcon build`"]);
    assert_eq!(protected.equations, ["$x^2$"]);
}

#[test]
fn display_math_is_one_span() {
    let protected = protect("Energy: $$E = mc^2$$ done");
    assert_eq!(protected.text, "Energy: {EQUATION_0} done");
}

#[test]
fn placeholders_are_numbered_per_kind() {
    let protected = protect("`a` `b` $c$");
    assert_eq!(protected.text, "{INLINE_CODE_0} {INLINE_CODE_1} {EQUATION_0}");
}

#[test]
fn code_inside_equation_restores() {
    let input = "see $a `b` c$ here";
    let protected = protect(input);
    assert_eq!(protected.text, "see {EQUATION_0} here");
    assert_eq!(protected.restore(protected.text.clone()), input);
}

#[test]
fn restore_survives_surrounding_edits() {
    let protected = protect("Use `rclpy` with $\\theta$.");
    let translated = protected.text.replace("Use", "استعمال کریں");
    assert_eq!(protected.restore(translated), "استعمال کریں `rclpy` with $\\theta$.");
}

#[test]
fn preserve_formatting_is_byte_identical() {
    let inputs = [
        "plain prose only",
        "```python\nimport rclpy\nprint('$not math$')\n```",
        "inline `x = 1` and $$\\int_0^1 f(x)\\,dx$$ and $y$",
        "unterminated ``` fence with `code`",
        "price is $5 and $10",
        "`x` then literal {INLINE_CODE_0}",
        "{LITERAL_1} {LITERAL_0}",
        "{CODE_BLOCK_0} {EQUATION_3} {LITERAL_0} before ```{INLINE_CODE_0}```",
        "",
    ];
    for input in inputs {
        assert_eq!(preserve_formatting(input), input, "{input:?}");
    }
}

#[test]
fn existing_placeholder_text_is_left_alone() {
    let input = "`x` then literal {INLINE_CODE_0}";
    let protected = protect(input);
    assert_eq!(protected.text, "{INLINE_CODE_0} then literal {LITERAL_0}");
    assert_eq!(protected.restore(protected.text.clone()), input);
}
