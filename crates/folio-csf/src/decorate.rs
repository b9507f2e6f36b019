use folio_core::{DecoratorFn, RenderFn, StoryContext};
use serde_json::{Value, json};

/// Render `context` through `decorators` around `render`.
///
/// The first decorator is innermost: with `[a, b]` the result is
/// `b(a(render))`. Each decorator receives a function rendering everything
/// inside it and may call it with a modified context.
pub fn decorate(render: &RenderFn, decorators: &[DecoratorFn], context: &StoryContext) -> Value {
    fn apply(
        depth: usize,
        render: &RenderFn,
        decorators: &[DecoratorFn],
        context: &StoryContext,
    ) -> Value {
        if depth == 0 {
            return render.call(&context.args, context);
        }
        let next = |inner: &StoryContext| apply(depth - 1, render, decorators, inner);
        decorators[depth - 1].call(&next, context)
    }
    apply(decorators.len(), render, decorators, context)
}

/// Render used when no layer supplies one: the component name with its args.
#[must_use]
pub fn default_render() -> RenderFn {
    RenderFn::new(|args, context| {
        let component = context
            .story
            .component
            .clone()
            .unwrap_or_else(|| context.story.component_id.clone());
        json!({ "component": component, "args": args })
    })
}

/// Render a story in its context, applying all of its decorators.
pub fn render_story(context: &StoryContext) -> Value {
    let render = context.story.render.clone().unwrap_or_else(default_render);
    decorate(&render, &context.story.decorators, context)
}
