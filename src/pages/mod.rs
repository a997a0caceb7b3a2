use crate::components::ui::{
    Badge, BadgeList, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, Checkbox, Input, Label, Spinner, Table, TableBody, TableCell,
    TableHead, TableHeader, TableRow, TableWrapper,
};
use crate::models::{EditField, Record};
use crate::state::{AppContext, TableController};
use leptos::prelude::*;

const COLUMN_COUNT: usize = 8;

#[component]
pub fn TablePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = expect_context::<TableController>();

    let total = move || app_state.0.table.with(|t| t.records().len());
    let shown = move || controller.visible_records().len();

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-6xl px-4 py-8">
                <Card>
                    <CardHeader>
                        <CardTitle class="text-xl">"Records"</CardTitle>
                        <CardDescription>
                            {move || format!("Showing {} of {}", shown(), total())}
                        </CardDescription>
                    </CardHeader>

                    <CardContent>
                        <div class="flex flex-col gap-4">
                            <Toolbar />

                            <TableWrapper>
                                <Table>
                                    <TableHeader>
                                        <TableRow>
                                            <TableHead>""</TableHead>
                                            <TableHead>"ID"</TableHead>
                                            <TableHead>"Name"</TableHead>
                                            <TableHead>"Email"</TableHead>
                                            <TableHead>"Date"</TableHead>
                                            <TableHead>"Tags"</TableHead>
                                            <TableHead>""</TableHead>
                                            <TableHead>""</TableHead>
                                        </TableRow>
                                    </TableHeader>

                                    <TableBody attr:id="table-body">
                                        <Show when=move || app_state.0.records_loading.get()>
                                            <TableRow>
                                                <TableCell attr:colspan=COLUMN_COUNT.to_string()>
                                                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                                                        <Spinner />
                                                        "Loading records…"
                                                    </div>
                                                </TableCell>
                                            </TableRow>
                                        </Show>

                                        <For
                                            each=move || controller.visible_records()
                                            key=|r: &Record| r.id
                                            let:record
                                        >
                                            <RecordRow record=record />
                                        </For>
                                    </TableBody>
                                </Table>
                            </TableWrapper>
                        </div>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

/// Search box plus the Edit / Delete actions.
#[component]
fn Toolbar() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = expect_context::<TableController>();

    let edit_disabled = move || !controller.actions().edit;
    // Delete stays clickable while unavailable so an empty-selection click
    // can still explain itself with an alert.
    let delete_unavailable = move || !controller.actions().delete;

    view! {
        <div class="flex flex-wrap items-end gap-3">
            <div class="flex min-w-64 flex-1 flex-col gap-2">
                <Label html_for="search-bar">"Search"</Label>
                <Input
                    id="search-bar"
                    r#type="search"
                    placeholder="Filter by id, name, email or date"
                    value=Signal::derive(move || app_state.0.search_query.get())
                    on_input=Callback::new(move |q: String| controller.set_search_query(q))
                />
            </div>

            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                class="edit"
                attr:disabled=edit_disabled
                on:click=move |_| controller.edit_selected()
            >
                "Edit"
            </Button>

            <Button
                variant=ButtonVariant::Destructive
                size=ButtonSize::Sm
                class="delete aria-disabled:opacity-50"
                attr:aria-disabled=move || delete_unavailable().to_string()
                on:click=move |_| {
                    controller.delete_selected();
                }
            >
                "Delete"
            </Button>
        </div>
    }
}

#[component]
fn RecordRow(record: Record) -> impl IntoView {
    let controller = expect_context::<TableController>();
    let id = record.id;

    let selected = move || controller.is_selected(id);
    let editing = move || controller.is_editing(id);

    view! {
        <TableRow
            attr:data-id=id.to_string()
            attr:data-state=move || if selected() { "selected" } else { "" }
        >
            <TableCell>
                <Checkbox
                    checked=Signal::derive(selected)
                    on_change=Callback::new(move |checked: bool| controller.toggle_row(id, checked))
                />
            </TableCell>
            <TableCell class="tabular-nums">{id}</TableCell>

            {EditField::ALL
                .into_iter()
                .map(|field| view! { <EditableCell id=id field=field /> })
                .collect_view()}

            <TableCell>
                <BadgeList>
                    {record
                        .tags
                        .into_iter()
                        .map(|tag| view! { <Badge class="tag">{tag}</Badge> })
                        .collect_view()}
                </BadgeList>
            </TableCell>

            <TableCell>
                <Show when=editing>
                    <Button
                        size=ButtonSize::Xs
                        class="save-btn"
                        on:click=move |_| controller.save_row(id)
                    >
                        "Save"
                    </Button>
                </Show>
            </TableCell>
            <TableCell>
                <Show when=editing>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Xs
                        class="cancel-btn"
                        on:click=move |_| controller.cancel_row(id)
                    >
                        "Cancel"
                    </Button>
                </Show>
            </TableCell>
        </TableRow>
    }
}

/// Plain text in display mode, a text input while the row has a draft.
#[component]
fn EditableCell(id: i64, field: EditField) -> impl IntoView {
    let controller = expect_context::<TableController>();
    let text = move || controller.cell_text(id, field);

    view! {
        <TableCell class="editable" attr:data-field=field.key()>
            <Show
                when=move || controller.is_editing(id)
                fallback=move || view! { <span>{text}</span> }
            >
                <Input
                    class="edit-input h-8"
                    name=field.key()
                    value=Signal::derive(text)
                    on_input=Callback::new(move |v: String| controller.update_draft(id, field, v))
                />
            </Show>
        </TableCell>
    }
}
