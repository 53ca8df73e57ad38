use shared::format::showing_range;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaginationControlsProps {
    pub page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub disabled: bool,
    pub on_page: Callback<u32>,
}

/// Pages shown around the current one, with `None` marking a gap
fn visible_pages(current: u32, total: u32) -> Vec<Option<u32>> {
    if total <= 7 {
        return (1..=total).map(Some).collect();
    }
    let mut pages = vec![Some(1)];
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    if start > 2 {
        pages.push(None);
    }
    pages.extend((start..=end).map(Some));
    if end < total - 1 {
        pages.push(None);
    }
    pages.push(Some(total));
    pages
}

#[function_component(PaginationControls)]
pub fn pagination_controls(props: &PaginationControlsProps) -> Html {
    let go_to = |page: u32| {
        let on_page = props.on_page.clone();
        Callback::from(move |_: MouseEvent| on_page.emit(page))
    };

    html! {
        <div class="pagination">
            <span class="pagination-info">
                {showing_range(props.page, props.page_size, props.total_count)}
            </span>
            {if props.total_pages > 1 {
                html! {
                    <div class="pagination-buttons">
                        <button
                            class="btn btn-page"
                            onclick={go_to(props.page.saturating_sub(1))}
                            disabled={props.disabled || props.page <= 1}
                        >
                            {"‹ Previous"}
                        </button>
                        {for visible_pages(props.page, props.total_pages).into_iter().map(|page| match page {
                            Some(page) => html! {
                                <button
                                    class={if page == props.page { "btn btn-page active" } else { "btn btn-page" }}
                                    onclick={go_to(page)}
                                    disabled={props.disabled}
                                >
                                    {page}
                                </button>
                            },
                            None => html! { <span class="pagination-gap">{"…"}</span> },
                        })}
                        <button
                            class="btn btn-page"
                            onclick={go_to(props.page + 1)}
                            disabled={props.disabled || props.page >= props.total_pages}
                        >
                            {"Next ›"}
                        </button>
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_visible_pages() {
        assert_eq!(visible_pages(1, 3), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            visible_pages(5, 10),
            vec![Some(1), None, Some(4), Some(5), Some(6), None, Some(10)]
        );
        assert_eq!(
            visible_pages(1, 10),
            vec![Some(1), Some(2), None, Some(10)]
        );
    }
}
