use axum::response::Html;

// Self-contained page: markup, style and script are all inline, so `/` works
// without anything in the static directory.
const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Shopping list</title>
    <style>
        body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
        li.purchased span { text-decoration: line-through; color: #888; }
        li button { margin-left: 0.5rem; }
    </style>
</head>
<body>
    <h1>Shopping list</h1>
    <form id="product-form">
        <input id="name-input" placeholder="Name" required>
        <input id="quantity-input" placeholder="Quantity">
        <select id="category-select">
            <option value="fruits_veg">Fruits &amp; vegetables</option>
            <option value="bakery">Bakery</option>
            <option value="dairy">Dairy</option>
            <option value="meat">Meat &amp; fish</option>
            <option value="drinks">Drinks</option>
            <option value="other" selected>Other</option>
        </select>
        <input id="price-input" placeholder="Price">
        <button type="submit">Add</button>
    </form>
    <ul id="product-list"></ul>
    <script>
        const API_BASE = "/api/products";
        const list = document.getElementById("product-list");

        async function request(url, options) {
            const res = await fetch(url, options);
            if (!res.ok) {
                const body = await res.json().catch(() => ({}));
                alert(body.error || "Something went wrong. Please try again.");
                return null;
            }
            return res.json();
        }

        function render(products) {
            list.innerHTML = "";
            for (const p of products) {
                const li = document.createElement("li");
                if (p.purchased) li.className = "purchased";

                const label = document.createElement("span");
                label.textContent = `${p.name} (${p.quantity ?? ""}, ${p.category ?? ""}) ${p.price}`;
                label.onclick = () => save({ ...p, purchased: !p.purchased });

                const remove = document.createElement("button");
                remove.textContent = "Delete";
                remove.onclick = () => request(`${API_BASE}/${p.id}`, { method: "DELETE" }).then(load);

                li.append(label, remove);
                list.append(li);
            }
        }

        function save(product) {
            return request(`${API_BASE}/${product.id}`, {
                method: "PUT",
                headers: { "Content-Type": "application/json" },
                body: JSON.stringify(product),
            }).then(load);
        }

        function load() {
            return request(API_BASE).then((products) => products && render(products));
        }

        document.getElementById("product-form").addEventListener("submit", async (e) => {
            e.preventDefault();
            await request(API_BASE, {
                method: "POST",
                headers: { "Content-Type": "application/json" },
                body: JSON.stringify({
                    name: document.getElementById("name-input").value,
                    quantity: document.getElementById("quantity-input").value,
                    category: document.getElementById("category-select").value,
                    price: document.getElementById("price-input").value,
                }),
            });
            e.target.reset();
            load();
        });

        load();
    </script>
</body>
</html>
"#;

/// Front-end entry page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
