use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {TableWrapper, div, "relative w-full overflow-x-auto"}
    clx! {Table, table, "w-full caption-bottom text-sm"}
    clx! {TableHeader, thead, "[&_tr]:border-b"}
    clx! {TableBody, tbody, "[&_tr:last-child]:border-0"}
    clx! {TableRow, tr, "border-b transition-colors hover:bg-muted/50 data-[state=selected]:bg-muted"}
    clx! {TableHead, th, "h-10 px-2 text-left align-middle font-medium whitespace-nowrap text-foreground"}
    clx! {TableCell, td, "p-2 align-middle whitespace-nowrap"}
}

pub use components::*;
